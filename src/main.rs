use anyhow::Result;
use indicatif::ProgressBar;

use std::io::{stdin, stdout, Stdin, Write};

use connect_four::*;

mod display;
use display::*;

/// Reads columns for manual players from the terminal
struct TerminalInput {
    stdin: Stdin,
}

impl MoveInput for TerminalInput {
    fn request_column(&mut self, state: &GameState, player: &Player) -> Result<usize> {
        loop {
            print!(
                "Player {}, enter a column number [1, {}]: ",
                player,
                state.width()
            );
            stdout().flush()?;

            let mut input_str = String::new();
            self.stdin.read_line(&mut input_str)?;
            match input_str.trim().parse::<usize>() {
                Ok(column) => return Ok(column),
                Err(_) => println!("Invalid number: {}", input_str.trim()),
            }
        }
    }
}

fn prompt(stdin: &Stdin, question: &str) -> Result<String> {
    print!("{}", question);
    stdout().flush()?;
    let mut buffer = String::new();
    stdin.read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

fn prompt_yes_no(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        match prompt(stdin, question)?.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn main() -> Result<()> {
    simple_logger::init_with_level(log::Level::Warn)?;

    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    let mut players = Vec::new();
    for (number, token) in [Token::RED, Token::YELLOW].iter().enumerate() {
        let mut name = prompt(&stdin, &format!("Enter player {} name: ", number + 1))?;
        if name.is_empty() {
            name = format!("Player {}", number + 1);
        }
        let ai = prompt_yes_no(
            &stdin,
            &format!("Is player {} AI controlled? y/n: ", number + 1),
        )?;
        players.push(if ai {
            Player::minimax(name, *token, SearchConfig::default())
        } else {
            Player::manual(name, *token)
        });
    }
    let all_ai = players.iter().all(Player::is_automated);

    let mut state = GameState::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, players)?;
    let mut input = TerminalInput { stdin };

    // game loop
    loop {
        display(&state)?;

        if let Some(outcome) = state.outcome() {
            match outcome {
                Outcome::Winner(player) => println!("{} wins!", player),
                Outcome::Draw => println!("Draw!"),
            }
            break;
        }

        let player = state.current_player().clone();
        let decision = if player.is_automated() {
            // slow down play if both players are AI
            if all_ai {
                std::thread::sleep(std::time::Duration::new(1, 0));
            }
            let spinner = ProgressBar::new_spinner();
            spinner.set_message(&format!("{} is thinking...", player));
            spinner.enable_steady_tick(100);
            let decision = player.next_move(&state, &mut input)?;
            spinner.finish_and_clear();
            decision
        } else {
            player.next_move(&state, &mut input)?
        };

        match decision {
            Decision::Play(next_move) => {
                if player.is_automated() {
                    println!("Best move: {}", next_move.column());
                }
                if let Err(err) = state.apply_move(&next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }
            Decision::NoLegalMove => {
                println!("No legal moves left, draw!");
                break;
            }
        }
    }
    Ok(())
}
