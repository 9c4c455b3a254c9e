//! Command surface: dotted command names bound to typed commands.
//!
//! Bindings are data. Resolving a name plus its tokenized arguments yields a
//! [`PlayerCommand`] for the engine to apply.

use std::collections::BTreeMap;

use glam::DVec3;

use deepspace_core::commands::{CommandArg, PlayerCommand, ShipCommand, UniverseCommand};
use deepspace_core::constants::{DEFAULT_RANDOM_VELOCITY, DEFAULT_WORLD_RADIUS};
use deepspace_core::error::{SimError, SimResult};
use deepspace_core::types::ObjectId;

/// Ship-level verbs, usable on the flagship (`ship.*`) or through `order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipVerb {
    Fly,
    Burn,
    Break,
    Cut,
    Patrol,
}

impl ShipVerb {
    pub const ALL: [ShipVerb; 5] = [
        ShipVerb::Fly,
        ShipVerb::Burn,
        ShipVerb::Break,
        ShipVerb::Cut,
        ShipVerb::Patrol,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShipVerb::Fly => "fly",
            ShipVerb::Burn => "burn",
            ShipVerb::Break => "break",
            ShipVerb::Cut => "cut",
            ShipVerb::Patrol => "patrol",
        }
    }

    /// Look up a verb by its short name (`fly`) or dotted name (`ship.fly`).
    pub fn from_name(name: &str) -> Option<ShipVerb> {
        let short = name.strip_prefix("ship.").unwrap_or(name);
        Self::ALL.into_iter().find(|verb| verb.name() == short)
    }

    /// Build the ship command from the verb's arguments.
    ///
    /// - `fly <target> <cruise_speed>`
    /// - `burn [throttle]` or `burn <x> <y> <z> [throttle]`
    /// - `break [throttle] [auto_cutoff]`
    /// - `cut`
    /// - `patrol <cruise_speed> <waypoint>...`
    pub fn parse(self, args: &[CommandArg]) -> SimResult<ShipCommand> {
        let command = match self {
            ShipVerb::Fly => {
                expect_len(self.name(), args, 2, 2)?;
                ShipCommand::Fly {
                    target: object_id(&args[0])?,
                    cruise_speed: number(&args[1])?,
                }
            }
            ShipVerb::Burn => match args.len() {
                0 | 1 => ShipCommand::Burn {
                    direction: None,
                    throttle: optional_number(args.first(), 1.0)?,
                },
                3 | 4 => ShipCommand::Burn {
                    direction: Some(DVec3::new(
                        number(&args[0])?,
                        number(&args[1])?,
                        number(&args[2])?,
                    )),
                    throttle: optional_number(args.get(3), 1.0)?,
                },
                n => {
                    return Err(SimError::InvalidArgument(format!(
                        "burn takes 0, 1, 3 or 4 arguments, got {n}"
                    )))
                }
            },
            ShipVerb::Break => {
                expect_len(self.name(), args, 0, 2)?;
                ShipCommand::BreakBurn {
                    throttle: optional_number(args.first(), 1.0)?,
                    auto_cutoff: optional_number(args.get(1), 0.0)? != 0.0,
                }
            }
            ShipVerb::Cut => {
                expect_len(self.name(), args, 0, 0)?;
                ShipCommand::CutBurn
            }
            ShipVerb::Patrol => {
                if args.len() < 2 {
                    return Err(SimError::InvalidArgument(
                        "patrol needs a cruise speed and at least one waypoint".into(),
                    ));
                }
                ShipCommand::Patrol {
                    cruise_speed: number(&args[0])?,
                    waypoints: args[1..].iter().map(object_id).collect::<SimResult<_>>()?,
                }
            }
        };
        Ok(command)
    }
}

/// Cockpit verbs, bound to the flagship's cockpit (`cockpit.*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CockpitVerb {
    Yaw,
    Pitch,
    Roll,
    Look,
    Turn,
    Follow,
    Reset,
}

impl CockpitVerb {
    pub const ALL: [CockpitVerb; 7] = [
        CockpitVerb::Yaw,
        CockpitVerb::Pitch,
        CockpitVerb::Roll,
        CockpitVerb::Look,
        CockpitVerb::Turn,
        CockpitVerb::Follow,
        CockpitVerb::Reset,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CockpitVerb::Yaw => "yaw",
            CockpitVerb::Pitch => "pitch",
            CockpitVerb::Roll => "roll",
            CockpitVerb::Look => "look",
            CockpitVerb::Turn => "turn",
            CockpitVerb::Follow => "follow",
            CockpitVerb::Reset => "reset",
        }
    }

    pub fn parse(self, args: &[CommandArg]) -> SimResult<ShipCommand> {
        let name = self.name();
        let command = match self {
            CockpitVerb::Yaw | CockpitVerb::Pitch | CockpitVerb::Roll => {
                expect_len(name, args, 1, 1)?;
                let degrees = number(&args[0])?;
                match self {
                    CockpitVerb::Yaw => ShipCommand::Yaw { degrees },
                    CockpitVerb::Pitch => ShipCommand::Pitch { degrees },
                    _ => ShipCommand::Roll { degrees },
                }
            }
            CockpitVerb::Look => {
                expect_len(name, args, 1, 1)?;
                ShipCommand::Look {
                    target: object_id(&args[0])?,
                }
            }
            CockpitVerb::Turn => {
                expect_len(name, args, 2, 2)?;
                ShipCommand::Turn {
                    target: object_id(&args[0])?,
                    fraction: number(&args[1])?,
                }
            }
            CockpitVerb::Follow => {
                expect_len(name, args, 1, 1)?;
                ShipCommand::Follow {
                    target: object_id(&args[0])?,
                }
            }
            CockpitVerb::Reset => {
                expect_len(name, args, 0, 0)?;
                ShipCommand::ResetCockpit
            }
        };
        Ok(command)
    }
}

/// Universe-wide verbs, acting on every object's motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniverseVerb {
    Random,
    RandPos,
    Center,
    Flip,
    Reset,
    Match,
    Meet,
}

impl UniverseVerb {
    pub const ALL: [UniverseVerb; 7] = [
        UniverseVerb::Random,
        UniverseVerb::RandPos,
        UniverseVerb::Center,
        UniverseVerb::Flip,
        UniverseVerb::Reset,
        UniverseVerb::Match,
        UniverseVerb::Meet,
    ];

    pub fn name(self) -> &'static str {
        match self {
            UniverseVerb::Random => "random",
            UniverseVerb::RandPos => "randpos",
            UniverseVerb::Center => "center",
            UniverseVerb::Flip => "flip",
            UniverseVerb::Reset => "reset",
            UniverseVerb::Match => "match",
            UniverseVerb::Meet => "meet",
        }
    }

    /// - `random [scale]`
    /// - `randpos [radius]`
    /// - `center`, `flip`, `reset`
    /// - `match <object> <target>`, `meet <object> <target>`
    pub fn parse(self, args: &[CommandArg]) -> SimResult<UniverseCommand> {
        let name = self.name();
        let command = match self {
            UniverseVerb::Random => {
                expect_len(name, args, 0, 1)?;
                UniverseCommand::RandomizeVelocities {
                    scale: optional_number(args.first(), DEFAULT_RANDOM_VELOCITY)?,
                }
            }
            UniverseVerb::RandPos => {
                expect_len(name, args, 0, 1)?;
                UniverseCommand::RandomizePositions {
                    radius: optional_number(args.first(), DEFAULT_WORLD_RADIUS)?,
                }
            }
            UniverseVerb::Center | UniverseVerb::Flip | UniverseVerb::Reset => {
                expect_len(name, args, 0, 0)?;
                match self {
                    UniverseVerb::Center => UniverseCommand::CenterVelocities,
                    UniverseVerb::Flip => UniverseCommand::FlipVelocities,
                    _ => UniverseCommand::Reset,
                }
            }
            UniverseVerb::Match | UniverseVerb::Meet => {
                expect_len(name, args, 2, 2)?;
                let object = object_id(&args[0])?;
                let target = object_id(&args[1])?;
                if self == UniverseVerb::Match {
                    UniverseCommand::MatchVelocity { object, target }
                } else {
                    UniverseCommand::MatchPosition { object, target }
                }
            }
        };
        Ok(command)
    }
}

/// What a registered command name resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandBinding {
    /// `ship.*`: a verb applied to the player's flagship.
    Flagship(ShipVerb),
    /// `cockpit.*`: a verb applied to the flagship's cockpit.
    Cockpit(CockpitVerb),
    /// `admiral.fleet`
    PrintFleet,
    /// `order <verb> <ship> <args>...`
    OrderShip,
    /// `tick [ticks]`
    Tick,
    /// Universe-wide motion commands (`random`, `flip`, ...).
    Universe(UniverseVerb),
}

/// Name → binding table for the command surface.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    bindings: BTreeMap<String, CommandBinding>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing any previous binding.
    pub fn register(&mut self, name: impl Into<String>, binding: CommandBinding) {
        let name = name.into();
        if let Some(previous) = self.bindings.insert(name.clone(), binding) {
            log::debug!("command {name} rebound (was {previous:?})");
        }
    }

    pub fn get(&self, name: &str) -> Option<CommandBinding> {
        self.bindings.get(name).copied()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Resolve a tokenized command into a typed one.
    pub fn resolve(&self, name: &str, args: &[CommandArg]) -> SimResult<PlayerCommand> {
        let binding = self
            .get(name)
            .ok_or_else(|| SimError::UnknownCommand(name.to_string()))?;
        let command = match binding {
            CommandBinding::Flagship(verb) => PlayerCommand::Flagship {
                command: verb.parse(args)?,
            },
            CommandBinding::Cockpit(verb) => PlayerCommand::Flagship {
                command: verb.parse(args)?,
            },
            CommandBinding::PrintFleet => {
                expect_len(name, args, 0, 0)?;
                PlayerCommand::PrintFleet
            }
            CommandBinding::OrderShip => {
                if args.len() < 2 {
                    return Err(SimError::InvalidArgument(
                        "usage: order <verb> <ship> [args...]".into(),
                    ));
                }
                let verb_name = args[0].as_str().ok_or_else(|| {
                    SimError::InvalidArgument(format!("expected a verb, got {:?}", args[0]))
                })?;
                let verb = ShipVerb::from_name(verb_name)
                    .ok_or_else(|| SimError::UnknownCommand(verb_name.to_string()))?;
                PlayerCommand::OrderShip {
                    ship: object_id(&args[1])?,
                    command: verb.parse(&args[2..])?,
                }
            }
            CommandBinding::Tick => {
                expect_len(name, args, 0, 1)?;
                PlayerCommand::Simulate {
                    ticks: optional_number(args.first(), 1.0)?,
                }
            }
            CommandBinding::Universe(verb) => PlayerCommand::Universe {
                command: verb.parse(args)?,
            },
        };
        Ok(command)
    }
}

fn expect_len(name: &str, args: &[CommandArg], min: usize, max: usize) -> SimResult<()> {
    if (min..=max).contains(&args.len()) {
        return Ok(());
    }
    let expected = if min == max {
        min.to_string()
    } else {
        format!("{min} to {max}")
    };
    Err(SimError::InvalidArgument(format!(
        "{name} takes {expected} arguments, got {}",
        args.len()
    )))
}

fn number(arg: &CommandArg) -> SimResult<f64> {
    arg.as_f64()
        .ok_or_else(|| SimError::InvalidArgument(format!("expected a number, got {arg:?}")))
}

fn optional_number(arg: Option<&CommandArg>, default: f64) -> SimResult<f64> {
    arg.map_or(Ok(default), number)
}

fn object_id(arg: &CommandArg) -> SimResult<ObjectId> {
    arg.as_i64()
        .and_then(|id| ObjectId::try_from(id).ok())
        .ok_or_else(|| SimError::InvalidArgument(format!("expected an object id, got {arg:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<CommandArg> {
        line.split_whitespace().map(CommandArg::coerce).collect()
    }

    fn player_registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        for verb in ShipVerb::ALL {
            registry.register(format!("ship.{}", verb.name()), CommandBinding::Flagship(verb));
        }
        for verb in CockpitVerb::ALL {
            registry.register(format!("cockpit.{}", verb.name()), CommandBinding::Cockpit(verb));
        }
        for verb in UniverseVerb::ALL {
            registry.register(verb.name(), CommandBinding::Universe(verb));
        }
        registry.register("order", CommandBinding::OrderShip);
        registry.register("tick", CommandBinding::Tick);
        registry
    }

    #[test]
    fn test_resolve_fly() {
        let registry = player_registry();
        let command = registry.resolve("ship.fly", &args("12 7.5")).unwrap();
        assert_eq!(
            command,
            PlayerCommand::Flagship {
                command: ShipCommand::Fly {
                    target: 12,
                    cruise_speed: 7.5
                }
            }
        );
    }

    #[test]
    fn test_resolve_burn_variants() {
        let registry = player_registry();
        assert_eq!(
            registry.resolve("ship.burn", &[]).unwrap(),
            PlayerCommand::Flagship {
                command: ShipCommand::Burn {
                    direction: None,
                    throttle: 1.0
                }
            }
        );
        assert_eq!(
            registry.resolve("ship.burn", &args("0 1 0 0.5")).unwrap(),
            PlayerCommand::Flagship {
                command: ShipCommand::Burn {
                    direction: Some(DVec3::Y),
                    throttle: 0.5
                }
            }
        );
        assert!(registry.resolve("ship.burn", &args("1 2")).is_err());
    }

    #[test]
    fn test_resolve_order() {
        let registry = player_registry();
        let command = registry.resolve("order", &args("break 4 1 1")).unwrap();
        assert_eq!(
            command,
            PlayerCommand::OrderShip {
                ship: 4,
                command: ShipCommand::BreakBurn {
                    throttle: 1.0,
                    auto_cutoff: true
                }
            }
        );
        assert_eq!(
            registry.resolve("order", &args("warp 4")),
            Err(SimError::UnknownCommand("warp".into()))
        );
    }

    #[test]
    fn test_unknown_name_and_bad_args() {
        let registry = player_registry();
        assert_eq!(
            registry.resolve("ship.warp", &[]),
            Err(SimError::UnknownCommand("ship.warp".into()))
        );
        assert!(matches!(
            registry.resolve("ship.fly", &args("vega 3")),
            Err(SimError::InvalidArgument(_))
        ));
        assert!(matches!(
            registry.resolve("ship.fly", &args("-1 3")),
            Err(SimError::InvalidArgument(_))
        ));
        assert!(matches!(
            registry.resolve("cockpit.yaw", &[]),
            Err(SimError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_resolve_cockpit_turn() {
        let registry = player_registry();
        assert_eq!(
            registry.resolve("cockpit.turn", &args("7 0.25")).unwrap(),
            PlayerCommand::Flagship {
                command: ShipCommand::Turn {
                    target: 7,
                    fraction: 0.25
                }
            }
        );
        assert!(registry.resolve("cockpit.turn", &args("7")).is_err());
    }

    #[test]
    fn test_resolve_universe_verbs() {
        let registry = player_registry();
        assert_eq!(
            registry.resolve("random", &[]).unwrap(),
            PlayerCommand::Universe {
                command: UniverseCommand::RandomizeVelocities {
                    scale: DEFAULT_RANDOM_VELOCITY
                }
            }
        );
        assert_eq!(
            registry.resolve("randpos", &args("100")).unwrap(),
            PlayerCommand::Universe {
                command: UniverseCommand::RandomizePositions { radius: 100.0 }
            }
        );
        assert_eq!(
            registry.resolve("meet", &args("3 4")).unwrap(),
            PlayerCommand::Universe {
                command: UniverseCommand::MatchPosition {
                    object: 3,
                    target: 4
                }
            }
        );
        assert!(registry.resolve("flip", &args("1")).is_err());
        assert!(registry.resolve("match", &args("3")).is_err());
    }

    #[test]
    fn test_tick_defaults_to_one() {
        let registry = player_registry();
        assert_eq!(
            registry.resolve("tick", &[]).unwrap(),
            PlayerCommand::Simulate { ticks: 1.0 }
        );
    }
}
