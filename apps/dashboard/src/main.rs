use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{ApiClient, RequestContext};
use dashboard::{
    config::{load_settings, Settings},
    controller::{
        customer::CustomerController, home::HomeController, login::LoginController,
        machine::MachineController, order::OrderController, piece::PieceController,
        sidebar::{self, Sidebar},
        task::TaskController, user::UserController, Controller, Route,
    },
    render,
    session::SessionStore,
};
use shared::{
    domain::{CustomerId, OrderId, PieceId, TaskId, UserId},
    protocol::{CustomerForm, PieceForm, UserForm},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dashboard", about = "Repair-shop management dashboard")]
struct Cli {
    /// Overrides `api_url` from dashboard.toml and the environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    Whoami,
    Home,
    #[command(subcommand)]
    Customers(CustomerCommand),
    #[command(subcommand)]
    Users(UserCommand),
    #[command(subcommand)]
    Machines(ListOnly),
    #[command(subcommand)]
    Pieces(PieceCommand),
    #[command(subcommand)]
    Tasks(ListOnly),
    #[command(subcommand)]
    Orders(OrderCommand),
    /// Changes the logged-in user's password.
    Password {
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Args, Debug, Default)]
struct ListArgs {
    /// Zero-based page index.
    #[arg(long, default_value_t = 0)]
    page: u32,
    #[arg(long, default_value = "")]
    search: String,
}

#[derive(Subcommand, Debug)]
enum ListOnly {
    List(ListArgs),
}

#[derive(Subcommand, Debug)]
enum CustomerCommand {
    List(ListArgs),
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        cpf: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        address: String,
    },
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    List(ListArgs),
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
    },
    Reset {
        #[arg(long)]
        id: String,
    },
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum PieceCommand {
    List(ListArgs),
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value = "")]
        brand: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
enum OrderCommand {
    List(ListArgs),
    Create {
        #[arg(long, default_value = "")]
        description: String,
        /// Task id; repeat for several tasks.
        #[arg(long = "task")]
        tasks: Vec<String>,
    },
    Approve {
        #[arg(long)]
        id: i64,
    },
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Removes tasks from an existing order.
    Detach {
        #[arg(long)]
        id: i64,
        #[arg(long = "task")]
        tasks: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings();
    init_tracing(&settings);

    let api_url = cli.api_url.as_deref().unwrap_or(&settings.api_url);
    let api = ApiClient::new(api_url).with_context(|| format!("invalid API url {api_url}"))?;
    let store = SessionStore::new(settings.session_file.clone());

    match cli.command {
        Command::Login { username, password } => {
            let mut login = LoginController::new(username, password);
            match login.submit(&api).await {
                Some((ctx, _next)) => {
                    store.save(&ctx)?;
                    println!("Login realizado.");
                }
                None => bail!(login.error.unwrap_or_default()),
            }
        }
        Command::Logout => {
            sidebar::logout(&store)?;
            println!("Sessão encerrada.");
        }
        Command::Whoami => {
            let sidebar = open_sidebar(&api, &store)?;
            let role = if sidebar.is_admin() { "admin" } else { "usuário" };
            println!("{} ({role})", sidebar.username());
            let menu: Vec<&str> = sidebar.menu().into_iter().map(Route::label).collect();
            println!("Menu: {}", menu.join(", "));
        }
        Command::Home => home(&api, &store).await?,
        Command::Customers(cmd) => customers(&api, &store, &settings, cmd).await?,
        Command::Users(cmd) => users(&api, &store, &settings, cmd).await?,
        Command::Machines(ListOnly::List(args)) => {
            let mut screen = MachineController::new(api, session(&store)?);
            screen.state.page = args.page;
            screen.filter = args.search;
            screen.load().await;
            settle(&screen)?;
            print!("{}", render::machines(&screen.visible()));
            println!("{}", render::pager(screen.state.pager()));
        }
        Command::Pieces(cmd) => pieces(&api, &store, cmd).await?,
        Command::Tasks(ListOnly::List(args)) => {
            let mut screen = TaskController::new(api, session(&store)?);
            screen.state.page = args.page;
            screen.filter = args.search;
            screen.load().await;
            settle(&screen)?;
            print!("{}", render::tasks(&screen.visible()));
            println!("{}", render::pager(screen.state.pager()));
        }
        Command::Orders(cmd) => orders(&api, &store, cmd).await?,
        Command::Password { old, new, confirm } => {
            let mut sidebar = open_sidebar(&api, &store)?;
            sidebar.password.old_password = old;
            sidebar.password.new_password = new;
            sidebar.password.confirm = confirm;
            if !sidebar.change_password().await {
                if sidebar.redirect.is_some() {
                    bail!(SESSION_EXPIRED);
                }
                bail!(sidebar.error.unwrap_or_default());
            }
            println!("Senha alterada.");
        }
    }

    Ok(())
}

const SESSION_EXPIRED: &str = "sessão expirada, execute `dashboard login`";

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn session(store: &SessionStore) -> Result<RequestContext> {
    let ctx = store.load()?;
    if !ctx.is_authenticated() {
        bail!(SESSION_EXPIRED);
    }
    Ok(ctx)
}

fn open_sidebar(api: &ApiClient, store: &SessionStore) -> Result<Sidebar> {
    Sidebar::open(api.clone(), session(store)?).map_err(|_| anyhow::anyhow!(SESSION_EXPIRED))
}

/// Turns the controller's redirect or error slot into the command outcome.
fn settle<C: Controller>(screen: &C) -> Result<()> {
    if screen.redirect() == Some(Route::Login) {
        bail!(SESSION_EXPIRED);
    }
    if let Some(error) = screen.error() {
        bail!(error.to_string());
    }
    Ok(())
}

async fn home(api: &ApiClient, store: &SessionStore) -> Result<()> {
    let mut screen = HomeController::new(api.clone(), session(store)?);
    screen.load().await;
    settle(&screen)?;
    println!("Sistema de Gerenciamento EletroSmart\n");
    for card in screen.cards() {
        println!("{card}");
    }
    Ok(())
}

async fn customers(
    api: &ApiClient,
    store: &SessionStore,
    settings: &Settings,
    cmd: CustomerCommand,
) -> Result<()> {
    let mut screen =
        CustomerController::new(api.clone(), session(store)?, settings.search_debounce());
    match cmd {
        CustomerCommand::List(args) => {
            screen.state.page = args.page;
            screen.search = args.search;
            screen.load().await;
            settle(&screen)?;
            let rows: Vec<_> = screen.state.content.iter().collect();
            print!("{}", render::customers(&rows));
            println!("{}", render::pager(screen.state.pager()));
        }
        CustomerCommand::Create {
            name,
            cpf,
            phone,
            email,
            address,
        } => {
            screen.open_create();
            screen.editor.draft = CustomerForm {
                id: None,
                name,
                cpf,
                phone,
                email,
                address,
            };
            screen.submit().await;
            settle(&screen)?;
            println!("Cliente criado.");
        }
        CustomerCommand::Delete { id } => {
            screen.open_delete(CustomerId(id));
            screen.confirm_delete().await;
            settle(&screen)?;
            println!("Cliente removido.");
        }
    }
    Ok(())
}

async fn users(
    api: &ApiClient,
    store: &SessionStore,
    settings: &Settings,
    cmd: UserCommand,
) -> Result<()> {
    let sidebar = open_sidebar(api, store)?;
    if sidebar.resolve(Route::User) != Route::User {
        eprintln!("Acesso restrito a administradores.");
        return home(api, store).await;
    }

    let mut screen = UserController::new(api.clone(), session(store)?, settings.search_debounce());
    match cmd {
        UserCommand::List(args) => {
            screen.state.page = args.page;
            screen.search = args.search;
            screen.load().await;
            settle(&screen)?;
            let rows: Vec<_> = screen.state.content.iter().collect();
            print!("{}", render::users(&rows));
            println!("{}", render::pager(screen.state.pager()));
        }
        UserCommand::Create { username, email } => {
            screen.open_create();
            screen.editor.draft = UserForm { username, email };
            screen.submit().await;
            settle(&screen)?;
            println!("Usuário criado.");
        }
        UserCommand::Reset { id } => {
            screen.open_reset(UserId(id));
            screen.confirm().await;
            settle(&screen)?;
            println!("Senha redefinida.");
        }
        UserCommand::Delete { id } => {
            screen.open_delete(UserId(id));
            screen.confirm().await;
            settle(&screen)?;
            println!("Usuário removido.");
        }
    }
    Ok(())
}

async fn pieces(api: &ApiClient, store: &SessionStore, cmd: PieceCommand) -> Result<()> {
    let mut screen = PieceController::new(api.clone(), session(store)?);
    match cmd {
        PieceCommand::List(args) => {
            screen.state.page = args.page;
            screen.filter = args.search;
            screen.load().await;
            settle(&screen)?;
            print!("{}", render::pieces(&screen.visible()));
            println!("{}", render::pager(screen.state.pager()));
        }
        PieceCommand::Create {
            name,
            price,
            brand,
            description,
        } => {
            screen.open_create();
            screen.editor.draft = PieceForm {
                id: None,
                name,
                price,
                brand,
                description,
            };
            screen.submit().await;
            settle(&screen)?;
            println!("Peça criada.");
        }
        PieceCommand::Delete { id } => {
            screen.open_delete(PieceId(id));
            screen.confirm_delete().await;
            settle(&screen)?;
            println!("Peça removida.");
        }
    }
    Ok(())
}

async fn orders(api: &ApiClient, store: &SessionStore, cmd: OrderCommand) -> Result<()> {
    let mut screen = OrderController::new(api.clone(), session(store)?);
    match cmd {
        OrderCommand::List(args) => {
            screen.state.page = args.page;
            screen.search = args.search;
            screen.load().await;
            settle(&screen)?;
            print!("{}", render::orders(&screen.state.content));
            println!("{}", render::pager(screen.state.pager()));
        }
        OrderCommand::Create { description, tasks } => {
            screen.open_create().await;
            settle(&screen)?;
            screen.editor.draft.description = description;
            for id in tasks {
                screen.toggle_task(&TaskId(id));
            }
            screen.submit_create().await;
            settle(&screen)?;
            println!("Pedido criado.");
        }
        OrderCommand::Approve { id } => {
            screen.open_approve(OrderId(id));
            screen.confirm().await;
            settle(&screen)?;
            println!("Pedido finalizado.");
        }
        OrderCommand::Delete { id } => {
            screen.open_delete(OrderId(id));
            screen.confirm().await;
            settle(&screen)?;
            println!("Pedido removido.");
        }
        OrderCommand::Detach { id, tasks } => {
            if !screen.open_edit(OrderId(id)).await {
                settle(&screen)?;
                bail!("pedido {id} não encontrado");
            }
            for task in tasks {
                screen.remove_task(&TaskId(task));
            }
            screen.save_edit().await;
            settle(&screen)?;
            println!("Pedido atualizado.");
        }
    }
    Ok(())
}
