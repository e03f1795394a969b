use std::{error::Error, thread};

mod console;
mod options;
mod stats;

use lifeboard::{Board, BoardResult, BoundedBoard, SparseBoard};
use log::info;
use options::{Args, BoardKind};
use stats::RunStats;

fn seed<B: Board>(board: &mut B, args: &Args) -> BoardResult<()> {
    if let Some(file_name) = args.input_file() {
        return board.load_board(file_name);
    }

    // setup the alive cells based on args
    let (grid_w, grid_h) = args.grid_size();
    board.initialize(args.fill_mode().create_alive(grid_w, grid_h));
    Ok(())
}

/// Keeps per-generation history only when it will be written out
fn run_stats(args: &Args, population: usize) -> RunStats {
    RunStats::new(population, args.stats_file().is_some())
}

fn run<B: Board>(mut board: B, args: &Args) -> Result<(), Box<dyn Error>> {
    seed(&mut board, args)?;
    info!("alive: {}", board.population());

    let mut console = if args.console() {
        Some(console::ConsoleRender::new()?)
    } else {
        None
    };
    let sleep = args.sleep();

    let mut stats = run_stats(args, board.population());
    let mut paused = false;
    let mut generation = 0;
    'generations: while generation < args.generations() {
        let mut advance = !paused;

        // render the console if in console mode
        if let Some(ref mut console) = console {
            while let Some(cmd) = console.poll_events()? {
                match cmd {
                    console::ConsoleCommand::Exit => break 'generations,
                    console::ConsoleCommand::TogglePause => {
                        paused = !paused;
                        advance = !paused;
                    }
                    console::ConsoleCommand::Step => advance = true,
                    console::ConsoleCommand::Handled => {}
                }
            }
            console.render(&board)?;
        }

        // report metrics every 500ms
        if stats.report_due() {
            let report = stats.report();
            if let Some(ref mut console) = console {
                let state = if paused { " [paused]" } else { "" };
                console.set_report(format!("{report}{state}"));
            } else {
                info!("{}", report);
            }
        }

        // compute the next generation
        if advance {
            board.update();
            generation += 1;
            stats.record(board.population());
        }
        if let Some(time) = sleep {
            thread::sleep(time);
        }
    }
    std::mem::drop(console);

    if let Some(file_name) = args.stats_file() {
        stats.save(&file_name)?;
        info!(
            "wrote {} generations of stats to {}",
            stats.history_len().unwrap_or_default(),
            file_name
        );
    }
    if let Some(file_name) = args.output_file() {
        board.write_board(&file_name)?;
        info!("wrote {} cells to {}", board.population(), file_name);
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let Some(args) = Args::from_env()? else {
        return Ok(());
    };

    match args.board_kind() {
        BoardKind::Sparse => run(SparseBoard::new(), &args),
        BoardKind::Bounded => {
            let (width, height) = args.grid_size();
            run(BoundedBoard::new(height, width), &args)
        }
    }
}
