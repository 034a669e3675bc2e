use std::fmt;

// ---------------------------------------------------------------------------
// Column errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("column '{column}' does not exist. Available columns: {}", ColumnList(.available))]
pub struct MissingColumn {
    pub column: String,
    pub available: Vec<String>,
}

/// Renders a column list as `[a, b, c]`.
pub struct ColumnList<'a>(pub &'a [String]);

impl fmt::Display for ColumnList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Accept `column` only if it is one of `available`.
pub fn pick_column(available: &[String], column: &str) -> Result<String, MissingColumn> {
    if available.iter().any(|c| c == column) {
        Ok(column.to_string())
    } else {
        Err(MissingColumn {
            column: column.to_string(),
            available: available.to_vec(),
        })
    }
}

// ---------------------------------------------------------------------------
// Axis resolution
// ---------------------------------------------------------------------------

/// Expected names for the two chart axes.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisDefaults {
    pub x: String,
    pub x_aliases: Vec<String>,
    pub y: String,
    pub y_aliases: Vec<String>,
}

impl Default for AxisDefaults {
    fn default() -> Self {
        Self {
            x: "odometer".into(),
            x_aliases: vec!["mileage".into()],
            y: "price".into(),
            y_aliases: Vec::new(),
        }
    }
}

/// Columns the user picked by hand.  Only ever holds names that were present
/// in the table at the time of the pick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisOverrides {
    pub x: Option<String>,
    pub y: Option<String>,
}

/// Outcome of resolving one axis.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisChoice {
    Column(String),
    /// Nothing matched; the user has to pick from `available`.
    Unresolved { wanted: String, available: Vec<String> },
}

impl AxisChoice {
    pub fn column(&self) -> Option<&str> {
        match self {
            AxisChoice::Column(c) => Some(c),
            AxisChoice::Unresolved { .. } => None,
        }
    }

    /// The resolved column, or the [`MissingColumn`] describing why not.
    pub fn require(&self) -> Result<&str, MissingColumn> {
        match self {
            AxisChoice::Column(c) => Ok(c),
            AxisChoice::Unresolved { wanted, available } => Err(MissingColumn {
                column: wanted.clone(),
                available: available.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisSelection {
    pub x: AxisChoice,
    pub y: AxisChoice,
}

/// Resolve both axes against the table's columns.
///
/// Per axis: user override, then the default name, then each alias in order.
pub fn resolve_axes(
    columns: &[String],
    defaults: &AxisDefaults,
    overrides: &AxisOverrides,
) -> AxisSelection {
    AxisSelection {
        x: resolve_one(columns, overrides.x.as_deref(), &defaults.x, &defaults.x_aliases),
        y: resolve_one(columns, overrides.y.as_deref(), &defaults.y, &defaults.y_aliases),
    }
}

fn resolve_one(
    columns: &[String],
    chosen: Option<&str>,
    default: &str,
    aliases: &[String],
) -> AxisChoice {
    chosen
        .into_iter()
        .chain(std::iter::once(default))
        .chain(aliases.iter().map(String::as_str))
        .find(|name| columns.iter().any(|c| c == name))
        .map(|name| AxisChoice::Column(name.to_string()))
        .unwrap_or_else(|| AxisChoice::Unresolved {
            wanted: default.to_string(),
            available: columns.to_vec(),
        })
}
