#[derive(Debug, Clone, Default)]
pub struct Message {
    pub sender: String,
    pub text: String,
    pub badges: Vec<Badge>,
    pub is_subscription: bool,
    pub is_whisper: bool,
}

impl Message {
    pub fn new(sender: &str, text: &str) -> Self {
        Self {
            sender: sender.to_string(),
            text: text.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Badge(String);

impl Badge {
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Badge {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Badge {
    fn from(name: String) -> Self {
        Self(name)
    }
}
