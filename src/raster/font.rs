use fontdue::{Font, FontSettings};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, ErrorKind, Result};

/// Resolves font names to font files.
pub trait FontProvider {
    fn locate(&self, name: &str) -> Option<PathBuf>;

    fn resolve(&self, name: &str) -> Result<PathBuf> {
        self.locate(name).ok_or_else(|| {
            Error::new(
                ErrorKind::UnsupportedFont,
                &format!("no font file found for '{}'", name),
            )
        })
    }
}

/// Looks for `<name>.ttf`, `.otf` or `.ttc` below a list of directories.
#[derive(Debug, Clone)]
pub struct SystemFonts {
    dirs: Vec<PathBuf>,
}

impl SystemFonts {
    const EXTENSIONS: [&'static str; 3] = ["ttf", "otf", "ttc"];
    const MAX_DEPTH: usize = 4;

    /// Searches `extra_dirs` first, then the usual system locations.
    pub fn new(extra_dirs: Vec<PathBuf>) -> Self {
        let mut search_dirs = extra_dirs;
        search_dirs.extend(dirs::font_dir());
        search_dirs.extend(
            [
                "/usr/share/fonts",
                "/usr/local/share/fonts",
                "/Library/Fonts",
                "/System/Library/Fonts",
                "C:\\Windows\\Fonts",
            ]
            .iter()
            .map(PathBuf::from),
        );

        SystemFonts { dirs: search_dirs }
    }

    pub fn with_dirs(dirs: Vec<PathBuf>) -> Self {
        SystemFonts { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    fn matches(path: &Path, name: &str) -> bool {
        let has_font_ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| {
                Self::EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            });

        let stem_matches = |part: Option<&std::ffi::OsStr>| {
            part.and_then(|p| p.to_str())
                .map_or(false, |p| p.eq_ignore_ascii_case(name))
        };

        has_font_ext && (stem_matches(path.file_stem()) || stem_matches(path.file_name()))
    }

    fn search(dir: &Path, name: &str, depth: usize) -> Option<PathBuf> {
        let mut entries: Vec<PathBuf> = match fs::read_dir(dir) {
            Ok(rd) => rd.filter_map(|entry| entry.ok().map(|e| e.path())).collect(),
            Err(_) => return None,
        };
        entries.sort();

        if let Some(found) = entries
            .iter()
            .find(|path| path.is_file() && Self::matches(path, name))
        {
            return Some(found.clone());
        }

        if depth == 0 {
            return None;
        }

        entries
            .iter()
            .filter(|path| path.is_dir())
            .find_map(|path| Self::search(path, name, depth - 1))
    }
}

impl FontProvider for SystemFonts {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        let direct = Path::new(name);
        if direct.is_file() {
            return Some(direct.to_owned());
        }

        let found = self
            .dirs
            .iter()
            .filter(|dir| dir.is_dir())
            .find_map(|dir| Self::search(dir, name, Self::MAX_DEPTH));

        match &found {
            Some(path) => log::debug!("font '{}' found at {}", name, path.display()),
            None => log::warn!("font '{}' not found in {:?}", name, self.dirs),
        }

        found
    }
}

pub fn load_font(path: &Path) -> Result<Font> {
    let bytes = fs::read(path)?;

    Font::from_bytes(bytes, FontSettings::default()).map_err(|err| {
        Error::new(
            ErrorKind::FontLoad,
            &format!("{}: {}", path.display(), err),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font_tree() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("truetype").join("dejavu");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("DejaVuSans.ttf"), b"").unwrap();
        fs::write(root.path().join("Notes.txt"), b"").unwrap();
        root
    }

    #[test]
    fn finds_nested_font() {
        let root = font_tree();
        let fonts = SystemFonts::with_dirs(vec![root.path().to_owned()]);

        let found = fonts.locate("DejaVuSans").unwrap();
        assert!(found.ends_with("truetype/dejavu/DejaVuSans.ttf"));
        assert_eq!(fonts.locate("dejavusans.ttf"), Some(found));
    }

    #[test]
    fn ignores_non_font_files() {
        let root = font_tree();
        let fonts = SystemFonts::with_dirs(vec![root.path().to_owned()]);
        assert_eq!(fonts.locate("Notes"), None);
    }

    #[test]
    fn accepts_direct_path() {
        let root = font_tree();
        let path = root.path().join("truetype/dejavu/DejaVuSans.ttf");
        let fonts = SystemFonts::with_dirs(Vec::new());
        assert_eq!(fonts.locate(path.to_str().unwrap()), Some(path));
    }

    #[test]
    fn unsupported_font() {
        let fonts = SystemFonts::with_dirs(Vec::new());
        let err = fonts.resolve("Comic Sans").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnsupportedFont));
        assert!(err.to_string().contains("'Comic Sans'"));
    }

    #[test]
    fn broken_font_file() {
        let root = font_tree();
        let err = load_font(&root.path().join("truetype/dejavu/DejaVuSans.ttf"))
            .err()
            .unwrap();
        assert!(matches!(err.kind, ErrorKind::FontLoad));
    }
}
