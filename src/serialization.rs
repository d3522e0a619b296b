pub mod solution {
    // format: per marker, three rows of `X`/`_` then a blank line

    use {
        crate::{
            error::*,
            marker::{Marker, SIDE},
        },
        std::{fmt::Write, path::Path},
    };

    pub fn serialize(markers: &[Marker]) -> String {
        let mut out = String::new();
        for marker in markers {
            // writing to a String cannot fail
            let _ = write!(out, "{marker}\n\n");
        }
        out
    }

    pub fn deserialize(text: &str) -> Result<Vec<Marker>> {
        let mut markers = Vec::new();
        let mut rows: Vec<[bool; SIDE]> = Vec::with_capacity(SIDE);
        let mut line_no = 0;

        for (i, line) in text.lines().enumerate() {
            line_no = i + 1;

            if line.is_empty() {
                if !rows.is_empty() {
                    return Err(Error::ParseSolution {
                        line: line_no,
                        reason: "marker has fewer than three rows",
                    });
                }
                continue;
            }

            let row = parse_row(line).ok_or(Error::ParseSolution {
                line: line_no,
                reason: "row must be three of `X` or `_`",
            })?;
            rows.push(row);

            if rows.len() == SIDE {
                markers.push(Marker::from_rows([rows[0], rows[1], rows[2]]));
                rows.clear();
            }
        }

        if !rows.is_empty() {
            return Err(Error::ParseSolution {
                line: line_no,
                reason: "marker has fewer than three rows",
            });
        }

        Ok(markers)
    }

    fn parse_row(line: &str) -> Option<[bool; SIDE]> {
        let cells = line
            .chars()
            .map(|c| match c {
                'X' => Some(true),
                '_' => Some(false),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;
        cells.try_into().ok()
    }

    pub fn write(path: &Path, markers: &[Marker]) -> Result<()> {
        std::fs::write(path, serialize(markers))?;
        Ok(())
    }

    #[test]
    fn test_serialization() {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        let markers: Vec<_> = std::iter::repeat_with(|| Marker::from_code(rng.gen_range(0..512)))
            .take(22)
            .collect();

        let text = serialize(&markers);
        assert_eq!(text.lines().count(), 22 * 4);
        assert_eq!(deserialize(&text).unwrap(), markers);
    }

    #[test]
    fn test_format() {
        let markers = [Marker::from_code(0b101_010_111), Marker::from_code(0)];
        assert_eq!(serialize(&markers), "X_X\n_X_\nXXX\n\n___\n___\n___\n\n");
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            deserialize("X_X\n_X_\n\n"),
            Err(Error::ParseSolution { line: 3, .. })
        ));
        assert!(matches!(
            deserialize("X_X\n_Y_\nXXX\n"),
            Err(Error::ParseSolution { line: 2, .. })
        ));
        assert!(matches!(
            deserialize("X_X\n_X_"),
            Err(Error::ParseSolution { line: 2, .. })
        ));
        assert!(deserialize("").unwrap().is_empty());
    }
}

pub mod lut {
    // format: per kernel, a three-line comment drawing it, then one row of
    // eight chain codes and a blank line

    use {
        crate::{
            error::*,
            triads::{Direction, Kernel, CLOSED, MAX_TRIADS},
        },
        std::{fmt::Write, path::Path, str::FromStr},
    };

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub enum Format {
        /// `ChainDirection.up.rawValue`, ready to paste into the tracer.
        #[default]
        Names,
        Codes,
    }

    impl FromStr for Format {
        type Err = Error;

        fn from_str(s: &str) -> Result<Self> {
            match s {
                "names" => Ok(Self::Names),
                "codes" => Ok(Self::Codes),
                other => Err(Error::InvalidConfig(format!(
                    "unknown table format `{other}`, expected `names` or `codes`"
                ))),
            }
        }
    }

    fn value(dxn: Option<Direction>, format: Format) -> String {
        match (dxn, format) {
            (None, _) => CLOSED.to_string(),
            (Some(d), Format::Names) => format!("ChainDirection.{}.rawValue", d.name()),
            (Some(d), Format::Codes) => d.chain_code().to_string(),
        }
    }

    pub fn serialize_kernel(kernel: Kernel, format: Format) -> String {
        let mut out = String::new();
        for line in kernel.to_string().lines() {
            let _ = writeln!(out, "// {line}");
        }

        let mut slots: [Option<Direction>; 2 * MAX_TRIADS] = [None; 2 * MAX_TRIADS];
        for (i, triad) in kernel.triads().iter().enumerate() {
            slots[2 * i] = Some(triad.from);
            slots[2 * i + 1] = Some(triad.to);
        }

        let row: Vec<_> = slots.iter().map(|&d| value(d, format)).collect();
        let _ = writeln!(out, "{},", row.join(", "));
        out
    }

    /// All 256 kernels, in order of their byte value.
    pub fn serialize(format: Format) -> String {
        Kernel::all()
            .map(|kernel| serialize_kernel(kernel, format))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn write(path: &Path, format: Format) -> Result<()> {
        std::fs::write(path, serialize(format))?;
        Ok(())
    }

    #[test]
    fn test_kernel_entries() {
        assert_eq!(
            serialize_kernel(Kernel(0), Format::Codes),
            "// 000\n// 0 0\n// 000\n0, 0, 0, 0, 0, 0, 0, 0,\n"
        );
        assert_eq!(
            serialize_kernel(Kernel(1), Format::Names),
            "// 100\n// 0 0\n// 000\n\
             ChainDirection.topLeft.rawValue, ChainDirection.topLeft.rawValue, 0, 0, 0, 0, 0, 0,\n"
        );
        assert_eq!(
            serialize_kernel(Kernel(37), Format::Codes),
            "// 101\n// 0 0\n// 100\n2, 7, 7, 5, 5, 2, 0, 0,\n"
        );

        let names = |kernel: u8| serialize_kernel(Kernel(kernel), Format::Names);
        assert_eq!(
            names(5),
            "// 101\n// 0 0\n// 000\n\
             ChainDirection.topRight.rawValue, ChainDirection.topLeft.rawValue, \
             ChainDirection.topLeft.rawValue, ChainDirection.topRight.rawValue, 0, 0, 0, 0,\n"
        );
        assert_eq!(
            names(9),
            "// 100\n// 1 0\n// 000\n\
             ChainDirection.topLeft.rawValue, ChainDirection.left.rawValue, 0, 0, 0, 0, 0, 0,\n"
        );
        assert_eq!(
            names(165),
            "// 101\n// 0 0\n// 101\n\
             ChainDirection.topRight.rawValue, ChainDirection.bottomRight.rawValue, \
             ChainDirection.bottomRight.rawValue, ChainDirection.bottomLeft.rawValue, \
             ChainDirection.bottomLeft.rawValue, ChainDirection.topLeft.rawValue, \
             ChainDirection.topLeft.rawValue, ChainDirection.topRight.rawValue,\n"
        );

        // no open cardinal, so nothing to start from
        assert_eq!(names(90), "// 010\n// 1 1\n// 010\n0, 0, 0, 0, 0, 0, 0, 0,\n");
        assert_eq!(names(254), "// 011\n// 1 1\n// 111\n0, 0, 0, 0, 0, 0, 0, 0,\n");
    }

    #[test]
    fn test_table() {
        let table = serialize(Format::Codes);
        let rows: Vec<&str> = table
            .lines()
            .filter(|l| !l.is_empty() && !l.starts_with("//"))
            .collect();
        assert_eq!(rows.len(), 256);
        assert!(rows.iter().all(|r| r.split(", ").count() == 8));
        assert_eq!(rows[255], "0, 0, 0, 0, 0, 0, 0, 0,");
        assert_eq!(table.matches("\n\n").count(), 255);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("names".parse::<Format>().unwrap(), Format::Names);
        assert_eq!("codes".parse::<Format>().unwrap(), Format::Codes);
        assert!("swift".parse::<Format>().is_err());
    }
}
