use bestseat_types::{AppEvent, CatalogKind, SelectionField, UiEvent};

pub const HELP: &str = "\
Commands:
  team1 <name|abbr>   pick the first team
  team2 <name|abbr>   pick the second team
  venue <name>        pick the stadium
  clear <field>       clear team1, team2 or venue
  reset               clear every field and the last result
  teams | venues      list the catalog
  show                print the current selection
  submit              request the best seat prediction
  cancel              abort the prediction in flight
  help                this text
  quit                exit";

/// Turn one input line into an event for the backend
pub fn parse_command(line: &str) -> Result<AppEvent, String> {
    let line = line.trim();
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };

    if let Some(field) = SelectionField::parse(command) {
        return Ok(AppEvent::SelectionChanged {
            field,
            value: arg.to_string(),
        });
    }

    let event = match command.to_ascii_lowercase().as_str() {
        "clear" => {
            let field = SelectionField::parse(arg)
                .ok_or_else(|| format!("Unknown field '{arg}', expected team1, team2 or venue"))?;
            AppEvent::ClearField(field)
        }
        "reset" => AppEvent::ResetForm,
        "teams" => AppEvent::ListCatalog(CatalogKind::Teams),
        "venues" | "stadiums" => AppEvent::ListCatalog(CatalogKind::Venues),
        "show" => AppEvent::UiEvent(UiEvent::Show),
        "submit" => AppEvent::Submit,
        "cancel" => AppEvent::Cancel,
        "help" | "?" => AppEvent::UiEvent(UiEvent::Help),
        "quit" | "exit" => AppEvent::UiEvent(UiEvent::Close),
        other => return Err(format!("Unknown command '{other}', type 'help'")),
    };

    Ok(event)
}
