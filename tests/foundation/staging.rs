//! Integration tests for the registration-then-freeze lifecycle

use minilex_foundation::{ErrorKind, Freeze, Result, Staged};

#[derive(Default)]
struct Names(Vec<String>);

struct Frozen(Vec<String>);

impl Freeze for Names {
    type Frozen = Frozen;
    const COMPONENT: &'static str = "names";

    fn freeze(self) -> Frozen {
        Frozen(self.0)
    }
}

fn add(staged: &mut Staged<Names>, name: &str) -> Result<()> {
    staged.register(format!("name {name}"), |names| {
        names.0.push(name.to_string());
        Ok(())
    })
}

#[test]
fn registration_before_use_is_kept() {
    let mut staged = Staged::<Names>::default();
    add(&mut staged, "a").unwrap();
    add(&mut staged, "b").unwrap();
    assert!(!staged.is_frozen());
    assert_eq!(staged.frozen().0, vec!["a", "b"]);
    assert!(staged.is_frozen());
}

#[test]
fn every_late_registration_fails() {
    let mut staged = Staged::<Names>::default();
    staged.frozen();
    for _ in 0..3 {
        let err = add(&mut staged, "late").unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::IllegalRegistration {
                component: "names",
                ..
            }
        ));
    }
    assert!(staged.frozen().0.is_empty());
}
