//! The fixed set of overlay sections.

use std::fmt;
use std::str::FromStr;

use folio_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// One named content panel of the portfolio overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    /// "About Me".
    #[default]
    About,
    /// "Projects".
    Projects,
    /// "Experience".
    Experience,
    /// "Tech Stack".
    TechStack,
    /// "Achievements".
    Achievements,
    /// "Contact".
    Contact,
}

impl SectionId {
    /// Every section, in navigation order.
    pub const ALL: [Self; 6] = [
        Self::About,
        Self::Projects,
        Self::Experience,
        Self::TechStack,
        Self::Achievements,
        Self::Contact,
    ];

    /// Returns the label shown on the navigation button.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::About => "About Me",
            Self::Projects => "Projects",
            Self::Experience => "Experience",
            Self::TechStack => "Tech Stack",
            Self::Achievements => "Achievements",
            Self::Contact => "Contact",
        }
    }

    /// Returns the URL-friendly slug.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Projects => "projects",
            Self::Experience => "experience",
            Self::TechStack => "tech-stack",
            Self::Achievements => "achievements",
            Self::Contact => "contact",
        }
    }

    fn ident(self) -> &'static str {
        match self {
            Self::About => "About",
            Self::Projects => "Projects",
            Self::Experience => "Experience",
            Self::TechStack => "TechStack",
            Self::Achievements => "Achievements",
            Self::Contact => "Contact",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SectionId {
    type Err = DomainError;

    /// Accepts the label, the identifier, or the slug, ignoring ASCII case
    /// and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|section| {
                [section.label(), section.ident(), section.slug()]
                    .iter()
                    .any(|name| name.eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| DomainError::InvalidSection(s.to_owned()))
    }
}
