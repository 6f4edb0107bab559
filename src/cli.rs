// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use clap::Subcommand;

use crate::app::App;
use crate::cmd;
use crate::cmd::stats::StatsFormat;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional path to the data directory.
    #[arg(long)]
    directory: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project the grade needed to pass a single course.
    Calc {
        #[command(subcommand)]
        command: CalcCommand,
    },
    /// Track semesters, courses, and their grades.
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },
    /// Print summary statistics.
    Stats {
        /// Output format.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Dump the full stored state as JSON.
    Export,
}

#[derive(Subcommand)]
enum CalcCommand {
    /// Add a graded component.
    Add {
        /// The component's name.
        name: String,
        /// The component's weight, in percentage points.
        percentage: f64,
        /// The score obtained, if already known.
        #[arg(default_value_t = 0.0)]
        score: f64,
    },
    /// Set the score of a component.
    Score {
        /// The component's id.
        id: String,
        /// The new score.
        score: f64,
    },
    /// Remove a component.
    Remove {
        /// The component's id.
        id: String,
    },
    /// Set the target grade.
    Target {
        /// The target on the 0-5 scale.
        target: f64,
    },
    /// Show the working set and its projections.
    Show,
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// Record a new semester.
    AddSemester {
        /// The semester's name, e.g. "2024-1".
        name: String,
    },
    /// Rename a semester.
    RenameSemester {
        /// The semester's id.
        semester: String,
        /// The new name.
        name: String,
    },
    /// Delete a semester and its courses.
    RemoveSemester {
        /// The semester's id.
        semester: String,
    },
    /// Add a course to a semester.
    AddCourse {
        /// The semester's id.
        semester: String,
        /// The course's name.
        name: String,
        /// The number of credits. Defaults to 3.
        #[arg(long)]
        credits: Option<u32>,
    },
    /// Edit a course's name, credits, or notes.
    EditCourse {
        /// The semester's id.
        semester: String,
        /// The course's id.
        course: String,
        /// The new name.
        #[arg(long)]
        name: Option<String>,
        /// The new number of credits.
        #[arg(long)]
        credits: Option<u32>,
        /// The new notes.
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove a course.
    RemoveCourse {
        /// The semester's id.
        semester: String,
        /// The course's id.
        course: String,
    },
    /// Add a graded component to a course.
    AddGrade {
        /// The semester's id.
        semester: String,
        /// The course's id.
        course: String,
        /// The component's name.
        name: String,
        /// The component's weight, in percentage points.
        percentage: f64,
        /// The score obtained, if already known.
        #[arg(default_value_t = 0.0)]
        score: f64,
    },
    /// Edit a graded component's name, weight, or score.
    EditGrade {
        /// The semester's id.
        semester: String,
        /// The course's id.
        course: String,
        /// The component's id.
        grade: String,
        /// The new name.
        #[arg(long)]
        name: Option<String>,
        /// The new weight.
        #[arg(long)]
        percentage: Option<f64>,
        /// The new score.
        #[arg(long)]
        score: Option<f64>,
    },
    /// Set the score of a graded component.
    Score {
        /// The semester's id.
        semester: String,
        /// The course's id.
        course: String,
        /// The component's id.
        grade: String,
        /// The new score.
        score: f64,
    },
    /// Remove a graded component.
    RemoveGrade {
        /// The semester's id.
        semester: String,
        /// The course's id.
        course: String,
        /// The component's id.
        grade: String,
    },
    /// Show the full history with program and period averages.
    Show,
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Cli = Cli::parse();
    let app = App::new(cli.directory)?;
    match cli.command {
        Command::Calc { command } => calc_command(&app, command),
        Command::History { command } => history_command(&app, command),
        Command::Stats { format } => cmd::stats::print_stats(&app, format),
        Command::Export => cmd::export::export_store(&app),
    }
}

fn calc_command(app: &App, command: CalcCommand) -> Fallible<()> {
    match command {
        CalcCommand::Add {
            name,
            percentage,
            score,
        } => cmd::calc::add(app, &name, percentage, score),
        CalcCommand::Score { id, score } => cmd::calc::score(app, &id, score),
        CalcCommand::Remove { id } => cmd::calc::remove(app, &id),
        CalcCommand::Target { target } => cmd::calc::target(app, target),
        CalcCommand::Show => cmd::calc::show(app),
    }
}

fn history_command(app: &App, command: HistoryCommand) -> Fallible<()> {
    match command {
        HistoryCommand::AddSemester { name } => cmd::history::add_semester(app, &name),
        HistoryCommand::RenameSemester { semester, name } => {
            cmd::history::rename_semester(app, &semester, &name)
        }
        HistoryCommand::RemoveSemester { semester } => {
            cmd::history::remove_semester(app, &semester)
        }
        HistoryCommand::AddCourse {
            semester,
            name,
            credits,
        } => cmd::history::add_course(app, &semester, &name, credits),
        HistoryCommand::EditCourse {
            semester,
            course,
            name,
            credits,
            notes,
        } => cmd::history::edit_course(app, &semester, &course, name, credits, notes),
        HistoryCommand::RemoveCourse { semester, course } => {
            cmd::history::remove_course(app, &semester, &course)
        }
        HistoryCommand::AddGrade {
            semester,
            course,
            name,
            percentage,
            score,
        } => cmd::history::add_grade(app, &semester, &course, &name, percentage, score),
        HistoryCommand::EditGrade {
            semester,
            course,
            grade,
            name,
            percentage,
            score,
        } => cmd::history::edit_grade(app, &semester, &course, &grade, name, percentage, score),
        HistoryCommand::Score {
            semester,
            course,
            grade,
            score,
        } => cmd::history::score_grade(app, &semester, &course, &grade, score),
        HistoryCommand::RemoveGrade {
            semester,
            course,
            grade,
        } => cmd::history::remove_grade(app, &semester, &course, &grade),
        HistoryCommand::Show => cmd::history::show(app),
    }
}
