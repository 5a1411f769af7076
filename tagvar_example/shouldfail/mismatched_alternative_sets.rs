use tagvar::prelude::*;

#[define_variant]
#[derive(Clone)]
enum Scalar {
    Int(i32),
    Float(f64),
    Char(char),
}

#[define_variant]
#[derive(Clone)]
enum Narrow {
    Int(i32),
    Char(char),
}

fn main() {
    let g = Scalar::from(-981i32);
    let v: Narrow = g.clone();

    let mut w: Var<Narrow> = Var::from_value('c');
    w.clone_from(&Var::<Scalar>::new());
}
