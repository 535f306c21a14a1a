use std::path::{Component, Path, PathBuf};

/// Lexically removes `.` components and folds `..` into the preceding component.
///
/// The filesystem is never consulted, so symbolic links are not resolved.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Expresses `path` relative to `base`, climbing out of `base` with `..` where needed.
///
/// Returns `None` when no relative form exists: one path is absolute and the other is
/// not, or they live under different roots (e.g. different drives on Windows).
pub fn relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    let path = normalize(path);
    let base = normalize(base);
    if path.has_root() != base.has_root() || path.is_absolute() != base.is_absolute() {
        return None;
    }

    let path_components: Vec<Component> = path.components().collect();
    let base_components: Vec<Component> = base.components().collect();
    if let (Some(Component::Prefix(a)), Some(Component::Prefix(b))) =
        (path_components.first(), base_components.first())
    {
        if a != b {
            return None;
        }
    }

    let common = path_components
        .iter()
        .zip(&base_components)
        .take_while(|(a, b)| a == b)
        .count();
    if base_components[common..]
        .iter()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return None;
    }

    let mut relative = PathBuf::new();
    for _ in &base_components[common..] {
        relative.push("..");
    }
    for component in &path_components[common..] {
        relative.push(component.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Some(relative)
}

/// Renders a path with `/` separators regardless of the host convention.
pub fn to_posix(path: &Path) -> String {
    let text = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        text.into_owned()
    } else {
        text.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_dot_and_parent_components() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn relative_to_handles_descendants_and_siblings() {
        assert_eq!(
            relative_to(Path::new("/top/sub/file.txt"), Path::new("/top")),
            Some(PathBuf::from("sub/file.txt"))
        );
        assert_eq!(
            relative_to(Path::new("/top/other/file.txt"), Path::new("/top/sub")),
            Some(PathBuf::from("../other/file.txt"))
        );
        assert_eq!(
            relative_to(Path::new("/top"), Path::new("/top")),
            Some(PathBuf::from("."))
        );
    }

    #[test]
    fn relative_to_rejects_mixed_absolute_and_relative_paths() {
        assert_eq!(relative_to(Path::new("file.txt"), Path::new("/top")), None);
        assert_eq!(relative_to(Path::new("/top/file.txt"), Path::new("top")), None);
    }

    #[test]
    fn to_posix_keeps_forward_slashes() {
        assert_eq!(to_posix(&Path::new("foo").join("bar").join("baz")), "foo/bar/baz");
    }
}
