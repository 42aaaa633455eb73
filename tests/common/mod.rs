//! Shared testing utilities for labquote CLI tests.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated working directory with helpers for writing drafts and configs.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write a quote draft file and return its path.
    pub fn write_draft(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(name);
        fs::write(&path, content).expect("Failed to write draft file");
        path
    }

    /// Write a labquote.toml pointing at the given gateway endpoint.
    pub fn write_config(&self, endpoint: &str) -> PathBuf {
        let path = self.root.path().join("labquote.toml");
        let content = format!(
            r#"[gateway]
endpoint = "{}"
timeout_secs = 5
"#,
            endpoint
        );
        fs::write(&path, content).expect("Failed to write config file");
        path
    }

    /// Build a command for invoking the compiled `labquote` binary.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("labquote").expect("Failed to locate labquote binary");
        cmd.current_dir(self.root.path());
        cmd
    }
}

/// A capsule draft that passes every validation rule.
#[allow(dead_code)]
pub const VALID_CAPSULE_DRAFT: &str = r#"
contact:
  firstName: Ada
  lastName: Lovelace
  email: ada@example.com
  confirmEmail: ada@example.com
  companyName: Analytical Supplements
  hasExistingProduct: "no"
  city: Austin
  state: TX
  zipCode: "78701"
productType: capsule
capsule:
  quantity: "3"
  ingredients:
    - formula: 5-HTP
      amount: "600"
"#;

/// A powder draft matching the worked pricing example (total $6.30).
#[allow(dead_code)]
pub const VALID_POWDER_DRAFT: &str = r#"
contact:
  firstName: Grace
  lastName: Hopper
  email: grace@example.com
  confirmEmail: grace@example.com
  companyName: Harbor Nutrition
  companyWebsite: "https://harbor-nutrition.example.com"
  hasExistingProduct: "yes"
  existingProductLink: "https://harbor-nutrition.example.com/original"
  city: Arlington
  state: VA
  zipCode: "22201-1234"
productType: powder
powder:
  flavorProfile: natural
  servings: "2"
  quantity: "1"
  ingredients:
    - formula: 5-HTP
      amount: "500"
"#;
