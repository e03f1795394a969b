use std::{str::FromStr, time::Duration};

use lifeboard::CellPos;

/// Board size used when none is given and the terminal size is unknown
const DEFAULT_SIZE: (usize, usize) = (100, 100);

#[derive(Debug, thiserror::Error)]
pub enum ArgsError {
    #[error(transparent)]
    Getopts(#[from] getopts::Fail),
    #[error("invalid value for --{name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

pub struct Args {
    matches: getopts::Matches,
    board: BoardKind,
    fill: FillMode,
    width: Option<usize>,
    height: Option<usize>,
    sleep: Option<u64>,
    gens: Option<usize>,
}

impl Args {
    pub fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>, ArgsError> {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("c", "console", "run in console mode");
        opts.optopt("b", "board", "board type: sparse or bounded", "TYPE");
        opts.optopt("o", "output", "write the final board to a file", "FILE");
        opts.optopt("i", "input", "load the board from a file", "FILE");
        opts.optopt("w", "width", "set grid width", "WIDTH");
        opts.optopt("h", "height", "set grid height", "HEIGHT");
        opts.optopt("f", "fill", "set fill type", "TYPE");
        opts.optopt(
            "s",
            "sleep",
            "the amount of time to sleep between generations",
            "MILLIS",
        );
        opts.optopt("g", "gens", "max number of generations", "COUNT");
        opts.optopt("", "stats", "write stats csv to file", "FILE");

        let matches = opts.parse(args.iter().map(T::as_ref))?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: lifeboard [options]"));
            return Ok(None);
        }

        let board = parse_choice(&matches, "board", "sparse", BoardKind::new)?;
        let fill = parse_choice(&matches, "fill", "random", FillMode::new)?;
        Ok(Some(Self {
            board,
            fill,
            width: parse_opt(&matches, "width")?,
            height: parse_opt(&matches, "height")?,
            sleep: parse_opt(&matches, "sleep")?,
            gens: parse_opt(&matches, "gens")?,
            matches,
        }))
    }
    pub fn from_env() -> Result<Option<Self>, ArgsError> {
        let env = std::env::args().skip(1).collect::<Vec<_>>();
        Self::new(&env)
    }

    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }
    pub fn board_kind(&self) -> BoardKind {
        self.board
    }

    pub fn generations(&self) -> usize {
        self.gens.unwrap_or(usize::MAX) // kinda hacky way of saying "infinity"
    }
    pub fn sleep(&self) -> Option<Duration> {
        match self.sleep {
            Some(millis) => Some(Duration::from_millis(millis)),
            None if self.console() => Some(Duration::from_millis(100)),
            None => None,
        }
    }

    /// Width and height of the bounded board, and of the area filled when no
    /// input file is given
    pub fn grid_size(&self) -> (usize, usize) {
        let default = if self.console() {
            crossterm::terminal::size()
                .map(|(cols, rows)| (cols as usize, rows.saturating_sub(1) as usize))
                .unwrap_or(DEFAULT_SIZE)
        } else {
            DEFAULT_SIZE
        };

        (
            self.width.unwrap_or(default.0),
            self.height.unwrap_or(default.1),
        )
    }
    pub fn fill_mode(&self) -> FillMode {
        self.fill
    }

    pub fn output_file(&self) -> Option<String> {
        self.matches.opt_str("output")
    }
    pub fn input_file(&self) -> Option<String> {
        self.matches.opt_str("input")
    }

    pub fn stats_file(&self) -> Option<String> {
        self.matches.opt_str("stats")
    }
}

fn parse_opt<T: FromStr>(
    matches: &getopts::Matches,
    name: &'static str,
) -> Result<Option<T>, ArgsError> {
    matches
        .opt_str(name)
        .map(|value| {
            value
                .parse()
                .map_err(|_| ArgsError::InvalidValue { name, value })
        })
        .transpose()
}

fn parse_choice<T>(
    matches: &getopts::Matches,
    name: &'static str,
    default: &str,
    choose: fn(&str) -> Option<T>,
) -> Result<T, ArgsError> {
    let value = matches.opt_str(name);
    let value = value.as_deref().unwrap_or(default);
    choose(value).ok_or_else(|| ArgsError::InvalidValue {
        name,
        value: value.to_owned(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardKind {
    Sparse,
    Bounded,
}
impl BoardKind {
    fn new(s: &str) -> Option<Self> {
        match s {
            "sparse" => Some(Self::Sparse),
            "bounded" => Some(Self::Bounded),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Random,
    Alternating,
    All,
    Empty,
}
impl FillMode {
    fn new(s: &str) -> Option<Self> {
        match s {
            "random" => Some(Self::Random),
            "alternating" => Some(Self::Alternating),
            "all" => Some(Self::All),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }

    fn reserve_size(&self, w: usize, h: usize) -> usize {
        let total = w * h;
        match self {
            Self::Random => total.div_ceil(2),
            Self::Alternating => total.div_ceil(2),
            Self::All => total,
            Self::Empty => 0,
        }
    }
    fn fill_cell<R: rand::Rng>(&self, cell: CellPos, rng: &mut R) -> bool {
        match self {
            Self::Random => rng.random_bool(0.5),
            Self::Alternating => (cell.row + cell.col) % 2 == 0,
            Self::All => true,
            Self::Empty => false,
        }
    }

    /// Live cells filling a `w` by `h` area anchored at the origin, in row-major order
    pub fn create_alive(self, w: usize, h: usize) -> Vec<CellPos> {
        let mut alive = Vec::new();
        let reserve_size = self.reserve_size(w, h);
        if reserve_size == 0 {
            // reserve_size indicates this will produce no alive cells
            return alive;
        }

        let mut rng = rand::rng();
        alive.reserve(reserve_size);
        for row in 0..h as i64 {
            for col in 0..w as i64 {
                let cell = CellPos { row, col };
                if self.fill_cell(cell, &mut rng) {
                    alive.push(cell);
                }
            }
        }
        alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::new(args).expect("valid args").expect("not a help request")
    }

    fn pos(row: i64, col: i64) -> CellPos {
        CellPos { row, col }
    }

    #[test]
    fn defaults_to_a_sparse_random_board() {
        let args = parse(&[]);

        assert_eq!(args.board_kind(), BoardKind::Sparse);
        assert_eq!(args.fill_mode(), FillMode::Random);
        assert_eq!(args.grid_size(), DEFAULT_SIZE);
        assert_eq!(args.generations(), usize::MAX);
        assert_eq!(args.sleep(), None);
    }

    #[test]
    fn options_parse() {
        let args = parse(&[
            "--board", "bounded", "--fill", "alternating", "-w", "12", "-h", "7", "-g", "30",
            "-s", "5", "-i", "in.txt",
        ]);

        assert_eq!(args.board_kind(), BoardKind::Bounded);
        assert_eq!(args.fill_mode(), FillMode::Alternating);
        assert_eq!(args.grid_size(), (12, 7));
        assert_eq!(args.generations(), 30);
        assert_eq!(args.sleep(), Some(Duration::from_millis(5)));
        assert_eq!(args.input_file().as_deref(), Some("in.txt"));
        assert_eq!(args.output_file(), None);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for bad in [
            &["--board", "hex"][..],
            &["--fill", "most"],
            &["--width", "wide"],
            &["--gens", "many"],
        ] {
            assert!(
                matches!(Args::new(bad), Err(ArgsError::InvalidValue { .. })),
                "{bad:?}"
            );
        }
        assert!(matches!(Args::new(&["--bogus"]), Err(ArgsError::Getopts(_))));
    }

    #[test]
    fn help_is_not_an_error() {
        assert!(matches!(Args::new(&["--help"]), Ok(None)));
    }

    #[test]
    fn create_alive_all_fills_grid() {
        let alive = FillMode::All.create_alive(3, 2);

        let expected = vec![
            pos(0, 0),
            pos(0, 1),
            pos(0, 2),
            pos(1, 0),
            pos(1, 1),
            pos(1, 2),
        ];
        assert_eq!(alive, expected);
    }

    #[test]
    fn create_alive_empty_is_empty() {
        let alive = FillMode::Empty.create_alive(5, 4);

        assert!(alive.is_empty());
    }

    #[test]
    fn create_alive_alternating_uses_parity() {
        let alive = FillMode::Alternating.create_alive(3, 3);

        let expected = vec![pos(0, 0), pos(0, 2), pos(1, 1), pos(2, 0), pos(2, 2)];
        assert_eq!(alive, expected);
    }

    #[test]
    fn create_alive_random_is_within_bounds() {
        let (w, h) = (4, 3);
        let alive = FillMode::Random.create_alive(w, h);

        assert!(
            alive
                .iter()
                .all(|p| p.row >= 0 && p.col >= 0 && p.row < h as i64 && p.col < w as i64)
        );
    }
}
