//! A scripted session against the example variants.
//!
//! Builds a few variants, mutates them through references, copies one into another and
//! finally asks for an alternative that isn't active, writing down what it sees along the
//! way.

use log::info;
use tagvar::prelude::*;

use crate::probe::{Event, Ledger};
use crate::{IntOrProbe, Scalar};

/// What [`walkthrough`] observed.
#[derive(Debug, Clone, PartialEq)]
pub struct Walkthrough {
    /// Values read back from the variants, and the message of the final mismatch.
    pub lines: Vec<String>,
    /// Everything that happened to the probes involved.
    pub events: Vec<Event>,
}

/// Runs the session.
///
/// # Errors
///
/// Only if a variant doesn't hold what the script just put into it.
///
/// # Examples
///
/// ```
/// let w = tagvar_example::walkthrough::walkthrough().unwrap();
/// assert_eq!(w.lines[..3], ["l", "-981", "6"]);
/// ```
pub fn walkthrough() -> tagvar::Result<Walkthrough> {
    let ledger = Ledger::new();
    let mut lines = Vec::new();

    let mut v: Var<Scalar> = Var::from_value('c');

    {
        let mut vv = IntOrProbe::from(1i32);
        let a = ledger.probe();
        vv.assign(a.clone());
        info!("holding `{}`", vv.alternative_name());
    }

    *v.get_mut::<char>()? = 'l';
    lines.push(v.get::<char>()?.to_string());

    let mut g: Var<Scalar> = Var::new();
    g.set(-981i32);
    v.clone_from(&g);
    lines.push(v.get::<i32>()?.to_string());

    *v.get_at_mut::<{ crate::scalar::INT }>()? = 6;
    lines.push(v.get::<i32>()?.to_string());

    match v.get::<char>() {
        Ok(c) => lines.push(c.to_string()),
        Err(e) => lines.push(e.to_string()),
    }

    Ok(Walkthrough {
        lines,
        events: ledger.events(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_transcript() {
        let w = walkthrough().unwrap();
        assert_eq!(
            w.lines,
            vec![
                "l".to_string(),
                "-981".to_string(),
                "6".to_string(),
                "cannot access alternative `char` of `Scalar`: active alternative is `i32`"
                    .to_string(),
            ]
        );
        assert_eq!(
            w.events,
            vec![
                Event::Created(0),
                Event::Cloned { from: 0, id: 1 },
                Event::Dropped(0),
                Event::Dropped(1),
            ]
        );
    }
}
