//! Focusboard CLI - task timers, breakdowns, and daily progress.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

use focusboard_assistant::{ChatClient, ChatSession, QuoteFetcher};
use focusboard_core::{format_time, EngineEvent, StepId, TaskId, TimerKey, TimerState};
use focusboard_engine::{pause_timer, start_timer, Engine, SharedEngine, TOTAL_SECTIONS};
use focusboard_storage::{JsonStorage, Storage};
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "focusboard")]
#[command(about = "Single-user productivity dashboard", long_about = None)]
struct Cli {
    /// Data directory for persisted state
    #[arg(long, default_value = ".focusboard")]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task name
        name: String,
        /// Estimated time in minutes
        #[arg(long)]
        minutes: u64,
    },
    /// List tasks and their countdowns
    List,
    /// Mark a task complete
    Complete {
        /// Task id
        id: TaskId,
    },
    /// Delete a task and its breakdown
    Delete {
        /// Task id
        id: TaskId,
    },
    /// Run a task (or step) timer until it exhausts or Ctrl-C
    Focus {
        /// Task id
        id: TaskId,
        /// Run this step's timer instead of the task's
        #[arg(long)]
        step: Option<StepId>,
    },
    /// Breakdown steps
    #[command(subcommand)]
    Step(StepCommands),
    /// Show aggregate progress toward the 8-hour goal
    Status,
    /// Clear all tasks, breakdowns, and progress
    Clear,
    /// Fetch a motivational quote
    Quote,
    /// Ask the assistant
    Chat {
        /// Your message
        message: String,
    },
}

#[derive(Subcommand)]
enum StepCommands {
    /// Add a step to a task's breakdown
    Add {
        /// Owning task id
        task: TaskId,
        /// Step name
        name: String,
        /// Estimated time in minutes
        #[arg(long)]
        minutes: u64,
    },
    /// List a task's steps
    List {
        /// Owning task id
        task: TaskId,
    },
    /// Complete (remove) a step
    Done {
        /// Owning task id
        task: TaskId,
        /// Step id
        step: StepId,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Quote => {
            let fetcher = QuoteFetcher::new(ChatClient::new());
            println!("\"{}\"", fetcher.fetch().await);
            return Ok(());
        }
        Commands::Chat { ref message } => {
            let mut storage = JsonStorage::new(&cli.data_dir).await?;
            let history = storage.load_chat_history().await?;
            let mut session = ChatSession::with_history(history);
            let reply = session.send(&ChatClient::new(), message).await;
            storage.save_chat_history(session.history()).await?;
            println!("{reply}");
            return Ok(());
        }
        _ => {}
    }

    let storage = JsonStorage::new(&cli.data_dir).await?;
    let (engine, mut events) = Engine::load(storage).await?;

    match cli.command {
        Commands::Add { name, minutes } => {
            let id = engine.lock().await.add_task(&name, minutes * 60).await?;
            println!("added task {id}: {name} ({minutes}m)");
        }
        Commands::List => {
            let engine = engine.lock().await;
            for task in engine.tasks() {
                let status = if task.is_incomplete() {
                    "incomplete"
                } else {
                    "complete"
                };
                println!(
                    "{}  {}  {}  [{}]",
                    task.id,
                    task.name,
                    format_time(task.remaining),
                    status
                );
            }
        }
        Commands::Complete { id } => {
            let report = engine.lock().await.complete_task(id).await?;
            println!(
                "completed task {id}; {} done today",
                format_time(report.complete_seconds)
            );
            print_celebrations(&mut events);
        }
        Commands::Delete { id } => {
            engine.lock().await.delete_task(id).await?;
            println!("deleted task {id}");
        }
        Commands::Focus { id, step } => {
            let key = match step {
                Some(step_id) => TimerKey::Step(step_id),
                None => TimerKey::Task(id),
            };
            run_focus(&engine, &mut events, key).await?;
        }
        Commands::Step(cmd) => match cmd {
            StepCommands::Add {
                task,
                name,
                minutes,
            } => {
                let id = engine
                    .lock()
                    .await
                    .add_step(task, &name, minutes * 60)
                    .await?;
                println!("added step {id} to task {task}");
            }
            StepCommands::List { task } => {
                let engine = engine.lock().await;
                for step in engine.steps(task) {
                    println!("{}  {}  {}", step.id, step.name, format_time(step.remaining));
                }
            }
            StepCommands::Done { task, step } => {
                engine.lock().await.delete_step(task, step).await?;
                println!("step {step} done");
            }
        },
        Commands::Status => {
            let report = engine.lock().await.recompute().await?;
            let hours = report.complete_seconds / 3600;
            let minutes = (report.complete_seconds % 3600) / 60;
            println!("complete time: {hours}h {minutes}m");
            println!(
                "sections: {}/{}  ({:.0}%)",
                report.sections_completed.min(TOTAL_SECTIONS),
                TOTAL_SECTIONS,
                report.percent
            );
            print_celebrations(&mut events);
        }
        Commands::Clear => {
            engine.lock().await.clear_all().await?;
            println!("cleared all tasks");
        }
        Commands::Quote | Commands::Chat { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Drive one timer in the foreground, printing each tick.
async fn run_focus(
    engine: &SharedEngine,
    events: &mut mpsc::UnboundedReceiver<EngineEvent>,
    key: TimerKey,
) -> Result<()> {
    start_timer(engine, key).await;
    if engine.lock().await.timer_state(key) != Some(TimerState::Running) {
        println!("timer for {key} cannot run (missing, complete, or exhausted)");
        return Ok(());
    }
    println!("focusing on {key}; Ctrl-C to pause");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                pause_timer(engine, key).await;
                println!("\npaused {key}");
                break;
            }
            event = events.recv() => match event {
                Some(EngineEvent::RemainingChanged { key: k, remaining }) if k == key => {
                    println!("  {}", format_time(remaining));
                }
                Some(EngineEvent::TimerExhausted { key: k }) if k == key => {
                    println!("time's up for {key}");
                    break;
                }
                Some(_) => {}
                None => break,
            }
        }
    }

    engine.lock().await.save_all().await?;
    Ok(())
}

fn print_celebrations(events: &mut mpsc::UnboundedReceiver<EngineEvent>) {
    while let Ok(event) = events.try_recv() {
        if let EngineEvent::SectionCompleted(celebration) = event {
            println!("🎉 {} complete! {}", celebration.label, celebration.message);
        }
    }
}
