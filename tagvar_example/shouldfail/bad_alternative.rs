use tagvar::define_variant;

#[define_variant]
enum HoldsArray {
    Int(i32),
    Bytes([u8; 4]),
}

#[define_variant]
enum HoldsReference {
    Int(i32),
    Text(&'static str),
}

#[define_variant]
enum HoldsUnit {
    Int(i32),
    Nothing(()),
}

#[define_variant]
enum HoldsParenthesizedUnit {
    Nothing((())),
}

#[define_variant]
enum HoldsNever {
    Never(!),
}

fn main() {}
