#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ErrorCode {
    /// The backing field's name does not agree with the declared property
    /// name under the `<Name>Property` / `<Name>PropertyKey` convention.
    MismatchedIdentifiers = 1001,

    /// The backing field is typed neither as the plain nor the keyed
    /// registration token.
    UnexpectedFieldType = 1002,

    /// The backing field is not `static readonly`.
    NotAStaticReadonlyField = 1003,
}

/// Diagnostic codes are prefixed with "-98" so that hosts rendering them
/// with their own numeric prefix can rewrite the sequence into a "DP"
/// marker, the same way other tool families reserve a digit prefix.
pub fn dp_error_code(code: ErrorCode) -> i32 {
    format!("-98{}", code as i32).parse::<i32>().unwrap()
}
