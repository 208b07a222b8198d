use dirs::home_dir;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".cheque_core";
const HOME_ENV: &str = "CHEQUE_CORE_HOME";
const CHEQUE_DIR: &str = "cheques";
const PAYMENT_ENTRY_DIR: &str = "payment_entries";
const CONFIG_FILE: &str = "config.json";
const COMPANIES_FILE: &str = "companies.json";

/// Resolves the on-disk layout used by the JSON store and config manager.
pub struct PathResolver;

impl PathResolver {
    /// Application data directory, `$CHEQUE_CORE_HOME` or `~/.cheque_core`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(root: Option<PathBuf>) -> PathBuf {
        root.unwrap_or_else(Self::base_dir)
    }

    pub fn cheque_dir_in(base: &Path) -> PathBuf {
        base.join(CHEQUE_DIR)
    }

    pub fn payment_entry_dir_in(base: &Path) -> PathBuf {
        base.join(PAYMENT_ENTRY_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }

    pub fn companies_file_in(base: &Path) -> PathBuf {
        base.join(COMPANIES_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Writes `data` to a sibling temp file and renames it over `path`.
pub fn write_atomic(path: &Path, data: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    fs::write(&tmp, data.as_bytes())?;
    fs::rename(&tmp, path)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => "tmp".to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Turns a document name into a file-system friendly stem.
pub fn canonical_name(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_') {
            slug.push(ch);
        } else {
            slug.push('_');
        }
    }
    if slug.is_empty() {
        "unnamed".into()
    } else {
        slug
    }
}
