//! The path encoder (spec.md §4.G): a deterministic mapping
//! `(clangModulePath, pcmArgs) → targetEncodedPcmPath`.
//!
//! The hash has to be stable across separate planner invocations on the same
//! architecture, since it ends up in filenames a downstream build cache keys on
//! (§9 "Hash stability of `encode`"). `FxHasher` (the teacher's `rustc-hash`
//! dependency, already used throughout `cribo_graph.rs` for its internal maps) fits:
//! it is a fixed, unseeded 64-bit hash with no per-process randomization, unlike
//! `std::collections::hash_map::DefaultHasher`, which is intentionally randomized per
//! process and would make the same PCM-args hash differently across planner runs.

use std::{
    hash::{Hash, Hasher},
    path::{Path, PathBuf},
};

use rustc_hash::FxHasher;

/// A fixed 64-bit, non-cryptographic, unseeded hash — the decimal string form is
/// embedded directly into encoded filenames.
pub fn stable_hash(pcm_args: &[String]) -> u64 {
    let mut hasher = FxHasher::default();
    for arg in pcm_args {
        arg.hash(&mut hasher);
        // A byte with no valid UTF-8 meaning separates adjacent args so that
        // `["-ab", "c"]` and `["-a", "bc"]` don't collide via naive concatenation.
        hasher.write_u8(0xff);
    }
    hasher.finish()
}

/// `encode(modulePath, pcmArgs)`: replace the first occurrence of the module's base
/// name (without extension) in `module_path` with that base name suffixed by the
/// decimal PCM-args hash.
pub fn encode(module_path: &Path, pcm_args: &[String]) -> PathBuf {
    let base_name = module_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let hash = stable_hash(pcm_args);
    let new_base = format!("{base_name}{hash}");

    let original = module_path.to_string_lossy();
    match original.find(base_name.as_str()) {
        Some(idx) => {
            let mut result = String::with_capacity(original.len() + new_base.len());
            result.push_str(&original[..idx]);
            result.push_str(&new_base);
            result.push_str(&original[idx + base_name.len()..]);
            PathBuf::from(result)
        }
        None => module_path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_deterministic_across_calls() {
        let args = vec!["-target".to_string(), "x86_64-apple-macosx10.15".to_string()];
        let a = encode(Path::new("/out/CA.pcm"), &args);
        let b = encode(Path::new("/out/CA.pcm"), &args);
        assert_eq!(a, b);
    }

    #[test]
    fn encode_is_injective_in_pcm_args_for_fixed_path() {
        let path = Path::new("/out/CA.pcm");
        let a = encode(path, &["-target".to_string(), "t1".to_string()]);
        let b = encode(path, &["-target".to_string(), "t2".to_string()]);
        assert_ne!(a, b, "different PCM-args must yield different output paths");
    }

    #[test]
    fn encode_keeps_directory_and_extension_and_embeds_base_name() {
        let encoded = encode(Path::new("/out/CA.pcm"), &["-target".to_string(), "t1".to_string()]);
        let encoded = encoded.to_string_lossy();
        assert!(encoded.starts_with("/out/CA"));
        assert!(encoded.ends_with(".pcm"));
    }

    #[test]
    fn argument_boundaries_are_not_collapsed() {
        let a = stable_hash(&["-ab".to_string(), "c".to_string()]);
        let b = stable_hash(&["-a".to_string(), "bc".to_string()]);
        assert_ne!(a, b);
    }
}
