//! 测试辅助工具
//!
//! 在临时目录中创建真实的包，供端到端测试使用

use std::path::{Path, PathBuf};
use strata_workspace::RunConfig;

/// 测试结束时删除的临时目录
pub struct TempProject {
    pub dir: PathBuf,
}

impl TempProject {
    /// 创建 `<tmp>/strata_<name>_<pid>/` 并写入清单
    pub fn new(name: &str, manifest: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("strata_{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("Strata.json"), manifest).unwrap();
        TempProject { dir }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn arg(&self) -> String {
        self.dir.to_string_lossy().to_string()
    }
}

impl Drop for TempProject {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

/// 使用本地文件系统的默认配置
pub fn native_config() -> RunConfig {
    RunConfig::default()
}

pub const WEB_MANIFEST: &str = r#"{
    "name": "web",
    "description": "end to end sample",
    "version": "0.3.0",
    "variables": [
        {"name": "host", "type": "string", "default": "localhost"},
        {"name": "port", "type": "number", "default": 8000},
        {"name": "stage", "type": "string", "default": "dev"},
        {"name": "endpoint"}
    ],
    "init": [
        {"name": "stage", "value": {"arg": "stage"}},
        {"name": "endpoint", "value": {"concat": [
            {"ref": "host"}, {"literal": ":"}, {"ref": "port"}, {"literal": "/"}, {"ref": "stage"}
        ]}}
    ]
}"#;
