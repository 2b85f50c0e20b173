use crate::core::config::data::{Config, DEFAULT_BASE_URL};

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.base_url {
            Some(url) => println!("  base-url: {url}"),
            None => println!("  base-url: (unset, using {DEFAULT_BASE_URL})"),
        }
        match &self.theme {
            Some(theme) => println!("  theme: {theme}"),
            None => println!("  theme: (unset)"),
        }
        match self.request_timeout_secs {
            Some(secs) if secs > 0 => println!("  request-timeout: {secs}s"),
            _ => println!("  request-timeout: (none)"),
        }
    }
}
