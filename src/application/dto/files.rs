#[derive(Debug, Clone)]
pub struct ServedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}
