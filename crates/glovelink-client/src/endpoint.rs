use std::fmt;
use std::str::FromStr;

/// Namespace shared by both hand channels, outermost segment first.
pub const PIPE_NAMESPACE: [&str; 4] = ["vrapplication", "input", "glove", "v2"];

/// The two fixed destinations a client can write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Left,
    Right,
}

impl Endpoint {
    pub const ALL: [Endpoint; 2] = [Endpoint::Left, Endpoint::Right];

    /// Lowercase hand name used in channel names.
    pub fn hand(self) -> &'static str {
        match self {
            Endpoint::Left => "left",
            Endpoint::Right => "right",
        }
    }

    /// Platform-neutral channel name, e.g. `vrapplication/input/glove/v2/left`.
    pub fn pipe_name(self) -> String {
        self.name_segments().join("/")
    }

    pub(crate) fn name_segments(self) -> [&'static str; 5] {
        let [a, b, c, d] = PIPE_NAMESPACE;
        [a, b, c, d, self.hand()]
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hand())
    }
}

/// Returned when a string names neither hand.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown hand {0:?} (expected \"left\" or \"right\")")]
pub struct ParseEndpointError(pub String);

impl FromStr for Endpoint {
    type Err = ParseEndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Endpoint::Left),
            "right" | "r" => Ok(Endpoint::Right),
            _ => Err(ParseEndpointError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipe_names_are_fixed() {
        assert_eq!(Endpoint::Left.pipe_name(), "vrapplication/input/glove/v2/left");
        assert_eq!(Endpoint::Right.pipe_name(), "vrapplication/input/glove/v2/right");
    }

    #[test]
    fn parses_hand_names() {
        assert_eq!("left".parse::<Endpoint>().unwrap(), Endpoint::Left);
        assert_eq!(" RIGHT ".parse::<Endpoint>().unwrap(), Endpoint::Right);
        assert_eq!("l".parse::<Endpoint>().unwrap(), Endpoint::Left);
        assert!("both".parse::<Endpoint>().is_err());
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for endpoint in Endpoint::ALL {
            assert_eq!(endpoint.to_string().parse::<Endpoint>().unwrap(), endpoint);
        }
    }
}
