/// One of the fixed set of ingredient kinds every lane keeps a dispenser for.
///
/// The catalogue is closed: every lane carries exactly one dispenser per
/// variant, regardless of which burger types are actually on the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum IngredientKind {
    BottomBun,
    TopBun,
    Patty,
    Cheese,
    Tomato,
    Lettuce,
    Onion,
    Bacon,
    Mayo,
    Jalapenos,
    Avocado,
    VeggiePatty,
    BbqSauce,
    SpicySauce,
    Pickles,
}

impl IngredientKind {
    /// All ingredient kinds, in dispenser layout order.
    pub const ALL: [IngredientKind; 15] = [
        IngredientKind::BottomBun,
        IngredientKind::TopBun,
        IngredientKind::Patty,
        IngredientKind::Cheese,
        IngredientKind::Tomato,
        IngredientKind::Lettuce,
        IngredientKind::Onion,
        IngredientKind::Bacon,
        IngredientKind::Mayo,
        IngredientKind::Jalapenos,
        IngredientKind::Avocado,
        IngredientKind::VeggiePatty,
        IngredientKind::BbqSauce,
        IngredientKind::SpicySauce,
        IngredientKind::Pickles,
    ];

    /// Display/dispenser name, always 30 characters or fewer.
    pub const fn name(self) -> &'static str {
        match self {
            IngredientKind::BottomBun => "bottom_bun",
            IngredientKind::TopBun => "top_bun",
            IngredientKind::Patty => "patty",
            IngredientKind::Cheese => "cheese",
            IngredientKind::Tomato => "tomato",
            IngredientKind::Lettuce => "lettuce",
            IngredientKind::Onion => "onion",
            IngredientKind::Bacon => "bacon",
            IngredientKind::Mayo => "mayo",
            IngredientKind::Jalapenos => "jalapenos",
            IngredientKind::Avocado => "avocado",
            IngredientKind::VeggiePatty => "veggie_patty",
            IngredientKind::BbqSauce => "bbq_sauce",
            IngredientKind::SpicySauce => "spicy_sauce",
            IngredientKind::Pickles => "pickles",
        }
    }

    /// Looks a kind up by its dispenser name.
    pub fn by_name(name: &str) -> Option<IngredientKind> {
        IngredientKind::ALL.into_iter().find(|k| k.name() == name)
    }
}

impl std::fmt::Display for IngredientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_names_are_within_limit_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for kind in IngredientKind::ALL {
            assert!(kind.name().len() <= 30);
            assert!(seen.insert(kind.name()), "duplicate name {}", kind.name());
        }
    }

    #[test]
    fn by_name_round_trips() {
        for kind in IngredientKind::ALL {
            assert_eq!(IngredientKind::by_name(kind.name()), Some(kind));
        }
        assert_eq!(IngredientKind::by_name("not_a_real_ingredient"), None);
    }
}
