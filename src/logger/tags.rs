/// Log tags identify the subsystem a message comes from
///
/// Each tag maps to a `--debug-<key>` command-line flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Database,
    Rates,
    Converter,
    Offers,
    Webserver,
}

impl LogTag {
    /// Key used for `--debug-<key>` flags
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Database => "database".to_string(),
            LogTag::Rates => "rates".to_string(),
            LogTag::Converter => "converter".to_string(),
            LogTag::Offers => "offers".to_string(),
            LogTag::Webserver => "webserver".to_string(),
        }
    }

    /// Uncolored label written to the log file
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::System => "SYSTEM".to_string(),
            LogTag::Config => "CONFIG".to_string(),
            LogTag::Database => "DATABASE".to_string(),
            LogTag::Rates => "RATES".to_string(),
            LogTag::Converter => "CONVERT".to_string(),
            LogTag::Offers => "OFFERS".to_string(),
            LogTag::Webserver => "WEBSERVER".to_string(),
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
