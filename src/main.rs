use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use menu_builder::export::{render_grocery_list, render_menu, render_recipe, write_document};
use menu_builder::types::DEFAULT_TEMPERATURE;
use menu_builder::{
    aggregate_ingredients, AppConfig, Cuisine, Day, ExecCtx, ManualMeal, MealSlot, Protein,
    Recipe, RecipeGenerator, RecipeRequest, SpiceLevel, WeeklyPlan,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "menu-builder")]
#[command(about = "Plan a week of meals and build the grocery list", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RecipeArgs {
    #[arg(long)]
    cuisine: Cuisine,
    #[arg(long)]
    protein: Protein,
    #[arg(long = "spice")]
    spice_level: SpiceLevel,
    /// Sampling temperature between 0.1 and 1.0
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f64,
}

impl RecipeArgs {
    fn to_request(&self) -> Result<RecipeRequest> {
        Ok(RecipeRequest::new(self.cuisine, self.protein, self.spice_level)
            .with_temperature(self.temperature)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty weekly plan file
    Init {
        plan: PathBuf,
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
    /// Generate a single recipe
    Generate {
        #[command(flatten)]
        recipe: RecipeArgs,
        /// Write the recipe as a document instead of printing it
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate a recipe into one slot of a plan
    Fill {
        plan: PathBuf,
        #[arg(long)]
        day: Day,
        #[arg(long)]
        slot: MealSlot,
        #[command(flatten)]
        recipe: RecipeArgs,
        /// Save the updated plan here instead of overwriting the input
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Enter a meal by hand into one slot of a plan
    Set {
        plan: PathBuf,
        #[arg(long)]
        day: Day,
        #[arg(long)]
        slot: MealSlot,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Ingredients, one per line
        #[arg(long)]
        ingredients: Option<String>,
        #[arg(long)]
        instructions: Option<String>,
        /// Save the updated plan here instead of overwriting the input
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Mark a day as eating out
    EatOut {
        plan: PathBuf,
        #[arg(long)]
        day: Day,
        /// Clear the flag instead of setting it
        #[arg(long)]
        off: bool,
        /// Save the updated plan here instead of overwriting the input
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render the weekly menu
    Menu {
        plan: PathBuf,
        /// Write the menu document here instead of printing it
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render the aggregated grocery list
    Groceries {
        plan: PathBuf,
        /// Write the grocery document here instead of printing it
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    menu_builder::logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Init { plan, force } => {
            if plan.exists() && !force {
                anyhow::bail!("{} already exists (use --force to replace it)", plan.display());
            }
            save_plan(&WeeklyPlan::new(), &plan)?;
            info!(path = %plan.display(), "created empty plan");
        }
        Commands::Generate { recipe, out } => {
            let request = recipe.to_request()?;
            let recipe = generate(&request).await?;
            emit(&render_recipe(&recipe), out.as_deref())?;
        }
        Commands::Fill {
            plan,
            day,
            slot,
            recipe,
            out,
        } => {
            let request = recipe.to_request()?;
            let mut week = load_plan(&plan)?;
            let recipe = generate(&request).await?;
            info!(%day, %slot, title = %recipe.title, "filled slot");
            week.apply_generated(day, slot, &request, recipe);
            save_plan(&week, out.as_deref().unwrap_or(&plan))?;
        }
        Commands::Set {
            plan,
            day,
            slot,
            title,
            description,
            ingredients,
            instructions,
            out,
        } => {
            let mut week = load_plan(&plan)?;
            let entry = ManualMeal {
                title,
                description,
                ingredients,
                instructions,
            };
            let meal = week.apply_manual(day, slot, entry);
            if meal.is_empty() {
                warn!(%day, %slot, "slot has no recipe details");
            } else {
                info!(%day, %slot, title = %meal.title, "entered meal by hand");
            }
            save_plan(&week, out.as_deref().unwrap_or(&plan))?;
        }
        Commands::EatOut {
            plan,
            day,
            off,
            out,
        } => {
            let mut week = load_plan(&plan)?;
            week.set_eat_out(day, !off);
            save_plan(&week, out.as_deref().unwrap_or(&plan))?;
        }
        Commands::Menu { plan, out } => {
            let week = load_plan(&plan)?;
            emit(&render_menu(&week), out.as_deref())?;
        }
        Commands::Groceries { plan, out } => {
            let week = load_plan(&plan)?;
            let list = aggregate_ingredients(&week);
            if !list.unmatched.is_empty() {
                info!(
                    count = list.unmatched.len(),
                    items = ?list.unmatched,
                    "ingredients without a leading quantity"
                );
            }
            emit(&render_grocery_list(&list), out.as_deref())?;
        }
    }

    Ok(())
}

async fn generate(request: &RecipeRequest) -> Result<Recipe> {
    let config = AppConfig::from_env().context("loading configuration")?;
    let ctx = ExecCtx::from_config(&config).context("building generation context")?;
    let generator = RecipeGenerator::new()
        .with_model(config.model.clone())
        .with_config(config.llm_config());
    Ok(generator.generate(&ctx, request).await)
}

fn load_plan(path: &Path) -> Result<WeeklyPlan> {
    WeeklyPlan::load(path).with_context(|| format!("reading plan {}", path.display()))
}

fn save_plan(plan: &WeeklyPlan, path: &Path) -> Result<()> {
    plan.save(path)
        .with_context(|| format!("writing plan {}", path.display()))
}

fn emit(text: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => write_document(path, text)
            .with_context(|| format!("writing document {}", path.display())),
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}
