pub mod peek;

/// Asserts an inline snapshot, recording the source text that produced it
/// as the snapshot's `info`.
///
/// The calling crate must depend on `insta`.
#[macro_export]
macro_rules! assert_snapshot_with_source {
    ($source:expr => $output:expr, @$snapshot:literal) => {{
        insta::with_settings!({
            info => &$source,
            omit_expression => true,
        }, {
            insta::assert_snapshot!($output, @$snapshot);
        })
    }};
}
