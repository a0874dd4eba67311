//! Console host assembling and driving a demo battle.
//!
//! Two teams of two trade blows until one side falls. Targets are chosen
//! interactively on stdin, or automatically with `--auto`; pass
//! `--seed <n>` to make a run reproducible.

mod input;
mod output;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Result, anyhow, bail};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing_subscriber::EnvFilter;

use fray_battle::{
    BattlePhase, LinearDecaySuccessCalculator, PatientBattle, SingleAllyTargetCalculator,
    SingleOtherTargetCalculator,
};
use fray_core::{
    AlwaysSucceeds, BasicCharacter, Character, CharacterId, DamageEffect, HealEffect,
    InMemoryHistory, Item, Move, MoveProcessor, MoveUseResult, RngRandom, Roster, SharedHistory,
    SharedInput, SharedRandom, seeded_random,
};

use crate::input::{ConsoleInput, RandomInput};
use crate::output::ConsoleOutput;

struct Options {
    seed: Option<u64>,
    auto: bool,
}

fn parse_args() -> Result<Options> {
    let mut options = Options {
        seed: None,
        auto: false,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().ok_or_else(|| anyhow!("--seed needs a value"))?;
                options.seed = Some(value.parse()?);
            }
            "--auto" => options.auto = true,
            other => bail!("unknown argument `{other}` (expected --seed <n> or --auto)"),
        }
    }

    Ok(options)
}

fn strike(input: &SharedInput, damage: i32) -> Result<Move> {
    let mv = Move::builder()
        .name("Strike")
        .with_targets(SingleOtherTargetCalculator::new(input.clone()))
        .with_success(AlwaysSucceeds)
        .with_effect(DamageEffect::new(damage))
        .build()?;
    Ok(mv)
}

fn mend(
    input: &SharedInput,
    random: &SharedRandom,
    history: &SharedHistory,
    amount: i32,
) -> Result<Move> {
    let mv = Move::builder()
        .name("Mend")
        .with_targets(SingleAllyTargetCalculator::new(input.clone()))
        .with_success(LinearDecaySuccessCalculator::new(
            80,
            10,
            20,
            MoveUseResult::Failure,
            random.clone(),
            history.clone(),
        ))
        .with_effect(HealEffect::new(amount))
        .build()?;
    Ok(mv)
}

fn build_roster(
    input: &SharedInput,
    random: &SharedRandom,
    history: &SharedHistory,
) -> Result<Roster> {
    let charm = Item::builder()
        .name("Warding Charm")
        .with_start_turn_effect(HealEffect::new(2))
        .build()?;

    let characters: Vec<Box<dyn Character>> = vec![
        Box::new(BasicCharacter::new(
            CharacterId(1),
            "Aldric",
            "Crimson",
            32,
            12,
            vec![strike(input, 8)?, mend(input, random, history, 7)?],
            random.clone(),
        )),
        Box::new(
            BasicCharacter::new(
                CharacterId(2),
                "Mira",
                "Crimson",
                24,
                17,
                vec![strike(input, 6)?, mend(input, random, history, 7)?],
                random.clone(),
            )
            .with_item(charm),
        ),
        Box::new(BasicCharacter::new(
            CharacterId(3),
            "Skarn",
            "Viridian",
            36,
            9,
            vec![strike(input, 9)?, mend(input, random, history, 6)?],
            random.clone(),
        )),
        Box::new(BasicCharacter::new(
            CharacterId(4),
            "Vex",
            "Viridian",
            22,
            15,
            vec![strike(input, 6)?, mend(input, random, history, 6)?],
            random.clone(),
        )),
    ];

    Ok(Roster::new(characters)?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = parse_args()?;

    let random: SharedRandom = match options.seed {
        Some(seed) => seeded_random(seed),
        None => Rc::new(RefCell::new(RngRandom::new(SmallRng::from_entropy()))),
    };
    let history = InMemoryHistory::shared();
    let input: SharedInput = if options.auto {
        Rc::new(RefCell::new(RandomInput::new(random.clone())))
    } else {
        Rc::new(RefCell::new(ConsoleInput))
    };

    let roster = build_roster(&input, &random, &history)?;
    let mut battle = PatientBattle::new(
        roster,
        MoveProcessor::new(),
        history,
        Box::new(ConsoleOutput),
    );

    let mut phases = 0usize;
    loop {
        let phase = battle.advance();
        tracing::debug!(%phase, "advanced battle");
        if phase == BattlePhase::BattleEnd {
            break;
        }
        phases += 1;
        if phases > 1_000 {
            bail!("battle failed to conclude after {phases} phases");
        }
    }

    // The terminal phase reports the conclusion when advanced
    battle.advance();

    Ok(())
}
