#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    base: String,
}

impl AssetPaths {
    pub fn for_host(host: &str) -> Self {
        Self {
            base: format!("http://{host}/static/images/"),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn program_card(&self, filename: &str) -> String {
        format!("{}program_cards/{filename}", self.base)
    }

    pub fn power_card(&self, filename: &str) -> String {
        format!("{}power_cards/{filename}", self.base)
    }

    pub fn placeholder(&self) -> String {
        format!("{}card_placeholder.png", self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_asset_urls() {
        let assets = AssetPaths::for_host("localhost:5000");
        assert_eq!(
            assets.program_card("move1.png"),
            "http://localhost:5000/static/images/program_cards/move1.png"
        );
        assert_eq!(
            assets.power_card("gear.png"),
            "http://localhost:5000/static/images/power_cards/gear.png"
        );
        assert_eq!(
            assets.placeholder(),
            "http://localhost:5000/static/images/card_placeholder.png"
        );
    }
}
