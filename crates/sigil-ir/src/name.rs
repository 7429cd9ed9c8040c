/// Generates unique names for synthesized declarations.
///
/// A supply is scoped to whatever context creates it (typically one unit) and
/// passed explicitly; two supplies never coordinate, so names are only unique
/// within the scope that owns the supply.
#[derive(Debug, Default)]
pub struct NameSupply {
    next: u32,
}

impl NameSupply {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&mut self, prefix: &str) -> String {
        let name = format!("{prefix}${}", self.next);
        self.next += 1;
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_per_supply() {
        let mut supply = NameSupply::new();
        assert_eq!(supply.fresh("tmp"), "tmp$0");
        assert_eq!(supply.fresh("tmp"), "tmp$1");
        assert_eq!(supply.fresh("sink"), "sink$2");

        // A fresh supply restarts; scoping is the caller's concern.
        assert_eq!(NameSupply::new().fresh("tmp"), "tmp$0");
    }
}
