use crate::scene::Color;
use tracing::warn;

/// Backdrop the result screen is painted on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HeroBackground {
    /// Deep blue night sky
    Super,
    /// Dark gray city
    SuperGray,
}

impl HeroBackground {
    /// Radial backdrop stops, from the center outwards.
    pub(crate) fn stops(self) -> [Color; 3] {
        match self {
            Self::Super => [Color::from_hex(0x1e3a8a), Color::from_hex(0x0c1129), Color::BLACK],
            Self::SuperGray => [Color::from_hex(0x4b5563), Color::from_hex(0x1f2937), Color::BLACK],
        }
    }
}

/// One of the twelve superheroes, one per month
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct HeroRecord {
    pub(crate) name: &'static str,
    pub(crate) month: &'static str,
    pub(crate) short_description: &'static str,
    pub(crate) long_description: &'static str,
    pub(crate) icon: &'static str,
    pub(crate) background: HeroBackground,
    pub(crate) primary: Color,
    pub(crate) secondary: Color,
}

macro_rules! hero {
    (
        $name:literal,
        $month:literal,
        $icon:literal,
        $background:ident,
        $primary:literal,
        $secondary:literal,
        $short:literal,
        $long:literal
    ) => {
        HeroRecord {
            name: $name,
            month: $month,
            short_description: $short,
            long_description: $long,
            icon: $icon,
            background: HeroBackground::$background,
            primary: Color::from_hex($primary),
            secondary: Color::from_hex($secondary),
        }
    };
}

pub(crate) static HEROES: [HeroRecord; 12] = [
    hero!(
        "Iron Man",
        "January",
        "ironman",
        Super,
        0xd32f2f,
        0xffc107,
        "Innovative, brave and always at the front of the battle.",
        "Tony Stark is a genius, billionaire, playboy and philanthropist. As Iron Man he uses his superior intellect and resources to build advanced technology that makes him one of the most powerful Avengers."
    ),
    hero!(
        "Batman",
        "February",
        "batman",
        SuperGray,
        0x212121,
        0x616161,
        "Cunning and strategic, fighting for justice from the shadows.",
        "Bruce Wayne is Gotham's Dark Knight. Without superpowers, he relies on his intellect, detective skills, technology and martial arts to fight crime and protect the innocent."
    ),
    hero!(
        "Spider-Man",
        "March",
        "spiderman",
        Super,
        0xd32f2f,
        0x1976d2,
        "Agile and responsible, always protecting his city.",
        "Peter Parker learned that with great power comes great responsibility. His spider abilities, spider-sense and web-shooters make him New York's friendly neighborhood Spider-Man."
    ),
    hero!(
        "Wonder Woman",
        "April",
        "wonder_woman",
        Super,
        0xd32f2f,
        0xffc107,
        "Brave and just, inspiring everyone with her strength.",
        "Diana Prince is an Amazon from Themyscira, gifted with divine powers. With her lasso of truth, bracelets and tiara she fights for justice, peace and equality in the world of mortals."
    ),
    hero!(
        "Thor",
        "May",
        "thor",
        Super,
        0x1976d2,
        0xffc107,
        "Strong and noble, always defending his own.",
        "The God of Thunder from Asgard wields the enchanted hammer Mjolnir. With divine strength and command over lightning, Thor protects both Asgard and Midgard from cosmic threats."
    ),
    hero!(
        "Black Panther",
        "June",
        "black_panther",
        SuperGray,
        0x424242,
        0x9c27b0,
        "Wise leader and protector of his kingdom.",
        "T'Challa is the king of Wakanda and bearer of the Black Panther mantle. With vibranium and his nation's advanced technology, he protects Wakanda and the whole world."
    ),
    hero!(
        "Mr. Terrific",
        "July",
        "mr_terrific",
        SuperGray,
        0x1976d2,
        0x4caf50,
        "Scientific genius and strategist with exceptional athletic skills.",
        "Michael Holt is considered the third smartest man in the world. His T-spheres and advanced technology, combined with his superior intellect, make him a valuable member of the JSA."
    ),
    hero!(
        "Flash",
        "August",
        "flash",
        Super,
        0xd32f2f,
        0xffc107,
        "Fast and determined, always right on time.",
        "Barry Allen is the fastest man alive, able to run at speeds that defy the laws of physics. His connection to the Speed Force lets him travel through time and between dimensions."
    ),
    hero!(
        "Doctor Strange",
        "September",
        "dr_strange",
        Super,
        0x1976d2,
        0x9c27b0,
        "Mystic and wise, master of the arts of time.",
        "Stephen Strange is Earth's Sorcerer Supreme. A master of the mystic arts, he protects our world from magical and dimensional threats with the Eye of Agamotto and other mystic artifacts."
    ),
    hero!(
        "Hulk",
        "October",
        "hulk",
        Super,
        0x4caf50,
        0x8bc34a,
        "Unstoppable strength, protecting the innocent.",
        "Bruce Banner turns into the incredible Hulk when he gets angry. With nearly limitless strength and superhuman endurance, he is one of the mightiest forces of the Marvel universe."
    ),
    hero!(
        "Superman",
        "November",
        "superman",
        Super,
        0x1976d2,
        0xd32f2f,
        "A symbol of hope and justice for all.",
        "Kal-El of Krypton, raised as Clark Kent in Kansas. With nearly limitless powers under the yellow sun, Superman stands for hope and is the ultimate symbol of justice."
    ),
    hero!(
        "Black Widow",
        "December",
        "black_widow",
        SuperGray,
        0x212121,
        0xd32f2f,
        "Lethal and strategic, an unstoppable force.",
        "Natasha Romanoff is a highly trained spy and assassin. A former Red Room agent, she now uses her lethal skills and combat expertise to protect the world as an Avenger."
    ),
];

/// The hero for a 1-based month. Months outside 1..=12 fall back to the last hero.
pub(crate) fn hero_for_month(month: i32) -> &'static HeroRecord {
    match usize::try_from(month).ok().and_then(|month| month.checked_sub(1)).and_then(|index| HEROES.get(index)) {
        Some(hero) => hero,
        None => {
            warn!("month {month} is out of range, falling back to the last hero");
            &HEROES[HEROES.len() - 1]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::january(1, "Iron Man", "January")]
    #[case::july(7, "Mr. Terrific", "July")]
    #[case::december(12, "Black Widow", "December")]
    #[case::thirteen(13, "Black Widow", "December")]
    #[case::zero(0, "Black Widow", "December")]
    #[case::negative(-4, "Black Widow", "December")]
    #[case::huge(i32::MAX, "Black Widow", "December")]
    fn lookup(#[case] month: i32, #[case] name: &str, #[case] label: &str) {
        let hero = hero_for_month(month);
        assert_eq!(hero.name, name);
        assert_eq!(hero.month, label);
    }

    #[test]
    fn every_month_has_its_own_hero() {
        let months = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        for (index, month) in months.iter().enumerate() {
            assert_eq!(hero_for_month(index as i32 + 1).month, *month);
        }
    }

    #[test]
    fn gray_backdrops() {
        let gray: Vec<_> =
            HEROES.iter().filter(|hero| hero.background == HeroBackground::SuperGray).map(|hero| hero.name).collect();
        assert_eq!(gray, ["Batman", "Black Panther", "Mr. Terrific", "Black Widow"]);
    }
}
