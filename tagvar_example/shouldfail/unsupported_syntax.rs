use tagvar::define_variant;

#[define_variant]
struct NotAnEnum(u8);

#[define_variant]
union Union {
    a: u8,
    b: u16,
}

#[define_variant]
enum Empty {}

#[define_variant]
enum NamedFields {
    A { x: u8 },
}

#[define_variant]
enum TwoFields {
    A(u8, u16),
}

#[define_variant]
enum NoField {
    A(u8),
    B,
}

#[define_variant(repr = "u8")]
enum WithArguments {
    A(u8),
}

#[define_variant]
pub(in crate::foo) enum UnsupportedVisibility {
    A(u8),
}

#[define_variant]
fn f() {}

fn main() {}
