use tagvar::prelude::*;

#[define_variant]
enum Scalar {
    Int(i32),
    Float(f64),
    Char(char),
}

fn main() {
    let mut v = Scalar::from('c');
    let _ = v.get::<u8>();
    let _ = v.get_at::<3>();
    v.assign("text");
    let _ = Var::<Scalar>::from_value(1u64);
}
