use std::fmt::Display;
use std::path::PathBuf;

pub trait ErrorType: Display + PartialEq {}

// Where an error happened. An empty file means the grammar came from a string,
// a zero line means the error concerns the whole input.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize
}

impl Location {
    pub fn line(line: usize) -> Self {
        Location {
            file: PathBuf::new(),
            line
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let has_file = !self.file.as_os_str().is_empty();
        match (has_file, self.line) {
            (true, 0) => write!(f, "{}", self.file.display()),
            (true, line) => write!(f, "{}:{}", self.file.display(), line),
            (false, 0) => write!(f, "grammar"),
            (false, line) => write!(f, "line {}", line),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

impl<T: ErrorType + std::fmt::Debug> std::error::Error for Error<T> {}

pub type Errors<T> = Vec<Error<T>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display() {
        let with_file = Location { file: PathBuf::from("g.cfg"), line: 4 };
        let whole_file = Location { file: PathBuf::from("g.cfg"), line: 0 };

        assert_eq!(with_file.to_string(), "g.cfg:4");
        assert_eq!(whole_file.to_string(), "g.cfg");
        assert_eq!(Location::line(7).to_string(), "line 7");
        assert_eq!(Location::default().to_string(), "grammar");
    }
}
