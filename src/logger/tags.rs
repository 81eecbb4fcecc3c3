/// Log tags identifying the subsystem a message comes from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    Cache,
    Store,
    Jupiter,
    Decoder,
    System,
}

impl LogTag {
    /// Plain uppercase label used in console output
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::Cache => "CACHE".to_string(),
            LogTag::Store => "STORE".to_string(),
            LogTag::Jupiter => "JUPITER".to_string(),
            LogTag::Decoder => "DECODER".to_string(),
            LogTag::System => "SYSTEM".to_string(),
        }
    }

    /// Lowercase key matched against `LoggerConfig::debug_tags`
    pub fn to_debug_key(&self) -> String {
        self.to_plain_string().to_lowercase()
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
