//! Output path derivation.

use std::path::{Path, PathBuf};

/// Output path next to the input: a `.txt` extension is replaced by
/// `suffix`, any other name gets `suffix` appended.
///
/// `drums.txt` with `_output.cbnk` becomes `drums_output.cbnk`.
pub fn derive_output_path(input: &Path, suffix: &str) -> PathBuf {
    let is_txt = input
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("txt"));

    let base = if is_txt {
        input.file_stem()
    } else {
        input.file_name()
    };
    let base = base.map(|b| b.to_string_lossy()).unwrap_or_default();

    input.with_file_name(format!("{}{}", base, suffix))
}
