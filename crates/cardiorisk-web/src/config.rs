use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use cardiorisk_core::{FeatureError, FeatureSchema};
use cardiorisk_report::{BUNDLED_FONT, ReportFont};
use clap::Parser;

pub const DEFAULT_PORT: u16 = 10000;

/// Heart-disease risk prediction web service.
#[derive(Debug, Clone, Parser)]
#[command(name = "cardiorisk", version, about)]
pub struct Config {
    /// Address to bind.
    #[arg(long, env = "CARDIORISK_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to bind.
    #[arg(long, env = "CARDIORISK_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Trained model artifact (.json, or .onnx with the `onnx` feature).
    #[arg(long, env = "CARDIORISK_MODEL", default_value = "models/heart_model.json")]
    pub model: PathBuf,

    /// Where the downloadable PDF report is written.
    #[arg(long, env = "CARDIORISK_REPORT_PATH", default_value = "heart_report.pdf")]
    pub report_path: PathBuf,

    /// TrueType font for the report.
    #[arg(long, env = "CARDIORISK_REPORT_FONT", default_value = BUNDLED_FONT)]
    pub report_font: PathBuf,

    /// Use builtin Helvetica instead (ASCII only: drops the status marker).
    #[arg(long, env = "CARDIORISK_BUILTIN_FONT", conflicts_with = "report_font")]
    pub builtin_font: bool,

    /// Form field names in the order the model was trained on. Defaults to
    /// the names recorded in the model artifact, else the UCI columns.
    #[arg(long, env = "CARDIORISK_FEATURES", value_delimiter = ',')]
    pub features: Vec<String>,

    /// Ignore field names and build the feature vector in submission order.
    #[arg(long, env = "CARDIORISK_POSITIONAL")]
    pub positional: bool,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Resolve the feature schema. `model_names` are the training-order names
    /// recorded by the loaded artifact, if any.
    pub fn schema(&self, model_names: Option<&[String]>) -> Result<FeatureSchema, FeatureError> {
        if self.positional {
            Ok(FeatureSchema::positional())
        } else if !self.features.is_empty() {
            FeatureSchema::new(self.features.iter().cloned())
        } else if let Some(names) = model_names {
            FeatureSchema::new(names.iter().cloned())
        } else {
            Ok(FeatureSchema::uci_heart())
        }
    }

    pub fn report_font(&self) -> ReportFont {
        if self.builtin_font {
            ReportFont::Builtin
        } else {
            ReportFont::TrueType(self.report_font.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_bind_all_interfaces_on_10000() {
        let config = Config::try_parse_from(["cardiorisk"]).unwrap();
        assert_eq!(config.addr().to_string(), "0.0.0.0:10000");
        assert_eq!(config.model, PathBuf::from("models/heart_model.json"));
        assert_eq!(config.report_path, PathBuf::from("heart_report.pdf"));
        assert_eq!(config.schema(None).unwrap(), FeatureSchema::uci_heart());
    }

    #[test]
    fn bundled_truetype_font_is_the_default() {
        let config = Config::try_parse_from(["cardiorisk"]).unwrap();
        assert_eq!(
            config.report_font(),
            ReportFont::TrueType(PathBuf::from("assets/fonts/DejaVuSans.ttf"))
        );
        assert_eq!(config.report_font(), ReportFont::default());
    }

    #[test]
    fn builtin_font_is_opt_in() {
        let config = Config::try_parse_from(["cardiorisk", "--builtin-font"]).unwrap();
        assert_eq!(config.report_font(), ReportFont::Builtin);
    }

    #[test]
    fn builtin_font_conflicts_with_font_path() {
        let result = Config::try_parse_from([
            "cardiorisk",
            "--builtin-font",
            "--report-font",
            "fonts/NotoSans.ttf",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn report_font_path_selects_truetype() {
        let config =
            Config::try_parse_from(["cardiorisk", "--report-font", "fonts/NotoSans.ttf"]).unwrap();
        assert_eq!(
            config.report_font(),
            ReportFont::TrueType(PathBuf::from("fonts/NotoSans.ttf"))
        );
    }

    #[test]
    fn feature_list_is_comma_separated() {
        let config =
            Config::try_parse_from(["cardiorisk", "--features", "age,chol,thalach"]).unwrap();
        assert_eq!(
            config.schema(None).unwrap().names(),
            names(&["age", "chol", "thalach"])
        );
    }

    #[test]
    fn schema_defaults_to_model_feature_names() {
        let config = Config::try_parse_from(["cardiorisk"]).unwrap();
        let recorded = names(&["chol", "age"]);
        assert_eq!(
            config.schema(Some(&recorded)).unwrap().names(),
            recorded.as_slice()
        );
    }

    #[test]
    fn explicit_features_take_precedence_over_model_names() {
        let config = Config::try_parse_from(["cardiorisk", "--features", "age,chol"]).unwrap();
        let recorded = names(&["chol", "age"]);
        assert_eq!(
            config.schema(Some(&recorded)).unwrap().names(),
            names(&["age", "chol"])
        );
    }

    #[test]
    fn repeated_feature_name_is_rejected() {
        let config = Config::try_parse_from(["cardiorisk", "--features", "age,age"]).unwrap();
        assert_eq!(
            config.schema(None).unwrap_err(),
            FeatureError::DuplicateName("age".into())
        );
    }

    #[test]
    fn positional_flag_overrides_feature_names() {
        let config = Config::try_parse_from(["cardiorisk", "--positional"]).unwrap();
        assert!(config.schema(None).unwrap().is_positional());
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(Config::try_parse_from(["cardiorisk", "--port", "http"]).is_err());
    }
}
