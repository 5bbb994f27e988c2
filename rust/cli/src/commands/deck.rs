//! Side deck editor: show, list options, save, reset.

use std::io::Write;

use pazaak_engine::cards::side_card_catalog;
use pazaak_engine::side_deck::{self, SideDeck};

use crate::cli::DeckAction;
use crate::error::CliError;
use crate::formatters::format_spec;
use crate::store::DeckStore;
use crate::ui;
use crate::validation::parse_deck_cards;

pub fn handle_deck_command(
    action: &DeckAction,
    store: &dyn DeckStore,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    match action {
        DeckAction::Show => show(store, out, err),
        DeckAction::Options => {
            let catalog: Vec<String> = side_card_catalog().iter().map(format_spec).collect();
            writeln!(out, "Available side cards:")?;
            for row in catalog.chunks(6) {
                writeln!(out, "  {}", row.join(" "))?;
            }
            Ok(())
        }
        DeckAction::Set { cards } => {
            let specs = match parse_deck_cards(cards) {
                Ok(specs) => specs,
                Err(e) => {
                    ui::write_error(err, &e.to_string())?;
                    return Err(e.into());
                }
            };
            let deck = SideDeck::from_specs(&specs)?;
            store.save_deck(&deck)?;
            writeln!(out, "Saved side deck: {}", describe(&deck))?;
            Ok(())
        }
        DeckAction::Reset => {
            store.clear_deck()?;
            writeln!(
                out,
                "Side deck reset to default: {}",
                describe(&SideDeck::default_deck())
            )?;
            Ok(())
        }
    }
}

fn show(store: &dyn DeckStore, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let deck = match store.load_deck_raw()? {
        None => {
            writeln!(out, "No saved side deck; using the default.")?;
            SideDeck::default_deck()
        }
        Some(raw) => match side_deck::parse_side_deck(&raw) {
            Ok(deck) => deck,
            Err(e) => {
                ui::display_warning(err, &format!("Saved side deck is invalid ({}); using the default.", e))?;
                SideDeck::default_deck()
            }
        },
    };
    writeln!(out, "Side deck: {}", describe(&deck))?;
    Ok(())
}

fn describe(deck: &SideDeck) -> String {
    deck.specs()
        .iter()
        .map(format_spec)
        .collect::<Vec<_>>()
        .join(" ")
}
