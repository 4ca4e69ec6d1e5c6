use std::fmt;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub css_url: &'static str,
}

pub const THEMES: [Theme; 17] = [
    Theme { name: "default", css_url: "//maxcdn.bootstrapcdn.com/bootstrap/3.3.4/css/bootstrap.min.css" },
    Theme { name: "cerulean", css_url: "//bootswatch.com/cerulean/bootstrap.css" },
    Theme { name: "cosmo", css_url: "//bootswatch.com/cosmo/bootstrap.css" },
    Theme { name: "cyborg", css_url: "//bootswatch.com/cyborg/bootstrap.css" },
    Theme { name: "darkly", css_url: "//bootswatch.com/darkly/bootstrap.css" },
    Theme { name: "flatly", css_url: "//bootswatch.com/flatly/bootstrap.css" },
    Theme { name: "journal", css_url: "//bootswatch.com/journal/bootstrap.css" },
    Theme { name: "lumen", css_url: "//bootswatch.com/lumen/bootstrap.css" },
    Theme { name: "paper", css_url: "//bootswatch.com/paper/bootstrap.css" },
    Theme { name: "readable", css_url: "//bootswatch.com/readable/bootstrap.css" },
    Theme { name: "sandstone", css_url: "//bootswatch.com/sandstone/bootstrap.css" },
    Theme { name: "simplex", css_url: "//bootswatch.com/simplex/bootstrap.css" },
    Theme { name: "slate", css_url: "//bootswatch.com/slate/bootstrap.css" },
    Theme { name: "spacelab", css_url: "//bootswatch.com/spacelab/bootstrap.css" },
    Theme { name: "superhero", css_url: "//bootswatch.com/superhero/bootstrap.css" },
    Theme { name: "united", css_url: "//bootswatch.com/united/bootstrap.css" },
    Theme { name: "yeti", css_url: "//bootswatch.com/yeti/bootstrap.css" },
];

#[derive(Debug, PartialEq)]
pub enum ThemeError {
    NotFound(String),
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ThemeError::NotFound(name) => write!(f, "ThemeError::NotFound: theme '{}' does not exist", name),
        }
    }
}

/// Looks up a theme by its exact name
///
/// # Arguments
///
/// * 'name' - theme name as given in the `theme` query parameter
pub fn find_theme(name: &str) -> Result<Theme, ThemeError> {
    THEMES.iter()
        .find(|t| t.name == name)
        .copied()
        .ok_or(ThemeError::NotFound(name.to_string()))
}
