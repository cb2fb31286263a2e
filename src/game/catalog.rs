use crate::protocol::{MissionCategory, MissionTier};

// ── Template definition ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissionTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub category: MissionCategory,
    pub tier: MissionTier,
}

const fn template(
    name: &'static str,
    description: &'static str,
    category: MissionCategory,
    tier: MissionTier,
) -> MissionTemplate {
    MissionTemplate {
        name,
        description,
        category,
        tier,
    }
}

/// Returns the full catalogue of mission templates.
pub fn all_templates() -> &'static [MissionTemplate] {
    use MissionCategory::*;
    use MissionTier::*;

    static TEMPLATES: &[MissionTemplate] = &[
        // ── Schemes ──────────────────────────────────────────────────
        template("Forge Hall Passes", "Create convincing hall passes for sneaking around.", Schemes, Petty),
        template("Rig the Lottery", "Subtly adjust the numbers in your favor.", Schemes, Petty),
        template("Spread Rumors", "Plant false stories to sow confusion among rivals.", Schemes, Petty),
        template("Tamper with Signs", "Redirect traffic to cause minor chaos.", Schemes, Petty),
        template("Steal Lunch Money", "Shake down unsuspecting do-gooders for pocket change.", Schemes, Petty),
        template("Blackmail the Mayor", "Acquire compromising photos for leverage.", Schemes, Sinister),
        template("Infiltrate the Council", "Plant a spy in the city council meetings.", Schemes, Sinister),
        template("Frame a Rival", "Set up evidence to implicate a competing villain.", Schemes, Sinister),
        template("Corrupt the Inspector", "Bribe building inspectors to look the other way.", Schemes, Sinister),
        template("Forge Royal Decrees", "Create official-looking documents for nefarious purposes.", Schemes, Sinister),
        template("Overthrow the Guild", "Execute a hostile takeover of the local guild.", Schemes, Diabolical),
        template("Master Plan Alpha", "Orchestrate a city-wide scheme of deception.", Schemes, Diabolical),
        template("Double Agent Network", "Establish agents in every major organization.", Schemes, Diabolical),
        template("Shadow Government", "Install puppet leaders across every nation.", Schemes, Legendary),
        template("Rewrite Reality", "Convince the entire world of your version of history.", Schemes, Legendary),
        // ── Heists ───────────────────────────────────────────────────
        template("Pilfer the Tip Jar", "Swipe coins from an unattended tip jar.", Heists, Petty),
        template("Snatch a Purse", "Quick grab-and-run from a distracted pedestrian.", Heists, Petty),
        template("Rob a Lemonade Stand", "The most dastardly of petty crimes.", Heists, Petty),
        template("Pocket the Silverware", "Dine and swipe at a fancy restaurant.", Heists, Petty),
        template("Swipe Library Books", "Take rare editions without checking them out.", Heists, Petty),
        template("Museum Night Raid", "Break in after hours for a priceless artifact.", Heists, Sinister),
        template("Jewel Store Heist", "Crack the display cases for sparkling loot.", Heists, Sinister),
        template("Vault Cracking", "Break into a bank vault with precision tools.", Heists, Sinister),
        template("Armored Car Ambush", "Intercept a cash transport on route.", Heists, Sinister),
        template("Casino Chip Swap", "Replace real chips with counterfeits.", Heists, Sinister),
        template("The Crown Jewels Job", "The heist of the century.", Heists, Diabolical),
        template("Fort Knox Breach", "Penetrate the most secure vault in the world.", Heists, Diabolical),
        template("Space Station Robbery", "Rob the orbital research station of its treasures.", Heists, Diabolical),
        template("Steal the Moon", "Shrink and pocket the moon.", Heists, Legendary),
        template("Loot the Multiverse", "Rob parallel dimensions of their most valuable artifacts.", Heists, Legendary),
        // ── Research ─────────────────────────────────────────────────
        template("Mix Stink Bombs", "Brew a particularly foul concoction.", Research, Petty),
        template("Invent Itching Powder", "A classic formula for maximum annoyance.", Research, Petty),
        template("Study Lock Picking", "Practice on padlocks from the hardware store.", Research, Petty),
        template("Brew Sleeping Potion", "A mild sedative for guard dogs.", Research, Petty),
        template("Decode Secret Messages", "Crack a simple cipher from intercepted notes.", Research, Petty),
        template("Build a Shrink Ray", "Miniaturize objects (and enemies) at will.", Research, Sinister),
        template("Develop Mind Control Serum", "A formula to bend wills temporarily.", Research, Sinister),
        template("Craft Smoke Grenades", "Perfect the vanishing act for quick escapes.", Research, Sinister),
        template("Engineer Trap Doors", "Design hidden escape routes and traps.", Research, Sinister),
        template("Forge Disguise Kit", "Create a kit of realistic disguises.", Research, Sinister),
        template("Build a Doomsday Device", "The ultimate bargaining chip for world domination.", Research, Diabolical),
        template("Create Clone Army", "Mass-produce loyal duplicates of your best minion.", Research, Diabolical),
        template("Invent Time Machine", "Bend time itself to your villainous will.", Research, Diabolical),
        template("Achieve Singularity", "Create a machine mind that bends reality to your will.", Research, Legendary),
        template("Entropy Reversal Engine", "Nothing decays unless you allow it.", Research, Legendary),
        // ── Mayhem ───────────────────────────────────────────────────
        template("TP the Hero's House", "Classic toilet paper bombardment.", Mayhem, Petty),
        template("Release the Pigeons", "Unleash birds in a shopping mall.", Mayhem, Petty),
        template("Glitter Bomb Delivery", "Send sparkly chaos to unsuspecting victims.", Mayhem, Petty),
        template("Rearrange Street Signs", "Cause navigational confusion citywide.", Mayhem, Petty),
        template("Clog the Fountains", "Fill public fountains with bubble bath.", Mayhem, Petty),
        template("Unleash Robot Swarm", "Deploy tiny robots to cause widespread mischief.", Mayhem, Sinister),
        template("Sabotage the Power Grid", "Plunge a district into darkness.", Mayhem, Sinister),
        template("Flood the Subway", "Redirect water mains into the transit tunnels.", Mayhem, Sinister),
        template("Hack the Billboards", "Display your evil manifesto on every screen.", Mayhem, Sinister),
        template("Release the Kraken", "Summon a sea beast in the harbor.", Mayhem, Sinister),
        template("Volcano Activation", "Trigger a dormant volcano near the city.", Mayhem, Diabolical),
        template("Summon a Meteor", "Call down space rocks for maximum drama.", Mayhem, Diabolical),
        template("Unleash the Kaiju", "Wake the ancient beast beneath the city.", Mayhem, Diabolical),
        template("Crack the Planet", "Continental-scale destruction.", Mayhem, Legendary),
        template("Summon the Elder God", "Awaken the thing from the deep.", Mayhem, Legendary),
    ];

    TEMPLATES
}

/// Small secondary table for missions that lower notoriety instead of paying.
pub fn cover_templates() -> &'static [MissionTemplate] {
    use MissionCategory::*;
    use MissionTier::Petty;

    static COVER: &[MissionTemplate] = &[
        template("Cover Your Tracks", "Wipe the fingerprints and burn the receipts.", Schemes, Petty),
        template("Bribe a Witness", "A little hush money goes a long way.", Schemes, Petty),
        template("Shred the Evidence", "Feed the case files to the shredder.", Research, Petty),
        template("Plant a False Trail", "Send the heroes chasing shadows across town.", Mayhem, Petty),
    ];

    COVER
}

/// Templates matching `(category, tier)`, relaxing to tier-only and then
/// category-only when the exact pair has no entries.
pub fn candidates(category: MissionCategory, tier: MissionTier) -> Vec<&'static MissionTemplate> {
    candidates_in(all_templates(), category, tier)
}

pub fn candidates_in(
    all: &[MissionTemplate],
    category: MissionCategory,
    tier: MissionTier,
) -> Vec<&MissionTemplate> {
    let exact: Vec<_> = all
        .iter()
        .filter(|t| t.category == category && t.tier == tier)
        .collect();
    if !exact.is_empty() {
        return exact;
    }

    let by_tier: Vec<_> = all.iter().filter(|t| t.tier == tier).collect();
    if !by_tier.is_empty() {
        return by_tier;
    }

    all.iter().filter(|t| t.category == category).collect()
}
