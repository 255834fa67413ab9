use crate::core::data::format_error::FormatError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthPainterKind {
    #[default]
    FireGradient,
    BlueWhiteGradient,
    Grayscale,
}

impl DepthPainterKind {
    pub const ALL: &'static [Self] = &[Self::FireGradient, Self::BlueWhiteGradient, Self::Grayscale];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::FireGradient => "Fire gradient",
            Self::BlueWhiteGradient => "Blue-white gradient",
            Self::Grayscale => "Grayscale",
        }
    }

    /// Looks a painter up by the name a picker shows, ignoring case.
    pub fn from_name(name: &str) -> Result<Self, FormatError> {
        let wanted = name.trim();

        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.display_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FormatError::new(name, "unknown painter"))
    }
}

impl fmt::Display for DepthPainterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).display_name())
    }
}

impl FromStr for DepthPainterKind {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
