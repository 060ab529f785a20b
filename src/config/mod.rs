pub mod resolved;
pub mod settings;

use resolved::BatchConfig;
use settings::Settings;
use std::path::Path;

/// 設定ファイル名（引数省略時にカレントディレクトリから探す）。
pub const DEFAULT_SETTINGS_FILE: &str = "settings.yaml";

/// 設定ファイルを読み込み、パスを解決した [`BatchConfig`] を返す。
///
/// `path` が指定されていればそのファイルを必ず読む（存在しなければエラー）。
/// 省略時はカレントディレクトリの `settings.yaml` を読み、
/// 存在しなければデフォルト設定を使う。
pub fn load_batch_config(path: Option<&Path>) -> crate::error::Result<BatchConfig> {
    match path {
        Some(settings_path) => {
            let settings = Settings::from_file(settings_path)?;
            let base_dir = settings_path.parent().unwrap_or_else(|| Path::new("."));
            BatchConfig::new(&settings, base_dir)
        }
        None => {
            let default_path = Path::new(DEFAULT_SETTINGS_FILE);
            let settings = if default_path.exists() {
                Settings::from_file(default_path)?
            } else {
                Settings::default()
            };
            BatchConfig::new(&settings, Path::new("."))
        }
    }
}
