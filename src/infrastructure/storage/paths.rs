use std::path::{Component, Path, PathBuf};

/// Joins a client-supplied file name onto `root`, accepting only a single
/// normal path component.
pub fn safe_join(root: &Path, filename: &str) -> anyhow::Result<PathBuf> {
    let mut components = Path::new(filename).components();
    let part = match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) => part,
        _ => anyhow::bail!("forbidden"),
    };
    if filename.contains(['/', '\\']) {
        anyhow::bail!("forbidden");
    }
    let full = root.join(part);
    if !full.starts_with(root) {
        anyhow::bail!("forbidden");
    }
    Ok(full)
}

pub async fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    Ok(())
}
