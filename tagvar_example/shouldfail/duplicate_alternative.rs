use tagvar::define_variant;

#[define_variant]
enum Twice {
    First(u32),
    Second(u32),
}

#[define_variant]
enum TwiceWithPaths {
    First(std::string::String),
    Second(std::string::String),
}

fn main() {}
