use clap::Parser;
use notecmd::cli::{
    run_add, run_ai_config, run_archive, run_delete, run_edit, run_guest, run_list, run_login,
    run_logout, run_menu, run_pin, run_show, run_signup, run_summarize, run_theme, run_whoami,
    ui, Cli, Commands,
};
use notecmd::db::Database;
use notecmd::session::Session;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    notecmd::logging::init(cli.verbose);

    let db = match cli.db {
        Some(path) => Database::open_at(path)?,
        None => Database::open()?,
    };
    let mut session = Session::restore(db)?;
    ui::set_dark_mode(session.dark_mode()?);

    match cli.command {
        None => {
            // No subcommand provided - show interactive menu
            run_menu(&mut session)?;
        }
        Some(Commands::Login(args)) => run_login(&mut session, &args.email, args.password)?,
        Some(Commands::Signup(args)) => {
            run_signup(&mut session, &args.email, args.password, args.confirm)?
        }
        Some(Commands::Guest) => run_guest(&mut session)?,
        Some(Commands::Logout) => run_logout(&mut session)?,
        Some(Commands::Whoami) => run_whoami(&session)?,
        Some(Commands::New(args)) => run_add(&mut session, args.title, args.content)?,
        Some(Commands::List(args)) => run_list(&mut session, args.archived)?,
        Some(Commands::Show(args)) => run_show(&session, &args.note)?,
        Some(Commands::Edit(args)) => run_edit(&mut session, &args)?,
        Some(Commands::Delete(args)) => run_delete(&mut session, &args.note, args.force)?,
        Some(Commands::Pin(args)) => run_pin(&mut session, &args.note, true)?,
        Some(Commands::Unpin(args)) => run_pin(&mut session, &args.note, false)?,
        Some(Commands::Archive(args)) => run_archive(&mut session, &args.note, true)?,
        Some(Commands::Unarchive(args)) => run_archive(&mut session, &args.note, false)?,
        Some(Commands::Summarize(args)) => run_summarize(&mut session, &args.note)?,
        Some(Commands::Theme(args)) => run_theme(&session, args.mode.as_deref())?,
        Some(Commands::Ai(args)) => run_ai_config(&session, &args)?,
    }

    Ok(())
}
