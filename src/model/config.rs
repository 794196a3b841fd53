use serde::{Deserialize, Serialize};

/// Configuration from .todoplus.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoConfig {
    #[serde(default)]
    pub file: FileConfig,
    #[serde(default)]
    pub colors: ExportColors,
    /// Whether the elapsed-time timer is running. Process-wide state with
    /// an explicit load/save point, not an ambient global.
    #[serde(default)]
    timer: bool,
}

impl TodoConfig {
    pub fn timer_enabled(&self) -> bool {
        self.timer
    }

    pub fn set_timer(&mut self, enabled: bool) {
        self.timer = enabled;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    /// Todo file name looked for (and created) by the open command
    #[serde(default = "default_file_name")]
    pub name: String,
    /// Contents written when creating a fresh todo file
    #[serde(default = "default_file_content")]
    pub default_content: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        FileConfig {
            name: default_file_name(),
            default_content: default_file_content(),
        }
    }
}

fn default_file_name() -> String {
    "TODO".to_string()
}

fn default_file_content() -> String {
    "Todo:\n  ☐ Item\n".to_string()
}

/// Colours used by the HTML export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportColors {
    #[serde(default = "default_project_color")]
    pub project: String,
    #[serde(default = "default_done_color")]
    pub done: String,
    #[serde(default = "default_cancelled_color")]
    pub cancelled: String,
    /// Background for dated/duration tags
    #[serde(default = "default_tag_color")]
    pub tag: String,
    /// Backgrounds for priority tags, parallel to the ranked vocabulary
    #[serde(default = "default_priority_palette")]
    pub priority: Vec<String>,
}

impl Default for ExportColors {
    fn default() -> Self {
        ExportColors {
            project: default_project_color(),
            done: default_done_color(),
            cancelled: default_cancelled_color(),
            tag: default_tag_color(),
            priority: default_priority_palette(),
        }
    }
}

fn default_project_color() -> String {
    "#66d9ef".to_string()
}

fn default_done_color() -> String {
    "#a6e25b".to_string()
}

fn default_cancelled_color() -> String {
    "#f92672".to_string()
}

fn default_tag_color() -> String {
    "#4b5056".to_string()
}

fn default_priority_palette() -> Vec<String> {
    ["#00b8d4", "#e2c542", "#e28f42", "#f92672", "#ae81ff"]
        .into_iter()
        .map(String::from)
        .collect()
}
