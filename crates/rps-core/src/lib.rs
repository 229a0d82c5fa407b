#![deny(warnings)]
pub mod game;
pub mod model;
pub mod network;
pub mod prob;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "rpsbayes"
    }

    pub const fn codename() -> &'static str {
        "Two Nets"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "rpsbayes");
        assert_eq!(AppInfo::codename(), "Two Nets");
        assert!(!AppInfo::version().is_empty());
    }
}
