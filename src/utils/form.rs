use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use regex::Regex;
use crate::models::{Field, GpaResult, Letter};
use crate::utils::courses::{CourseList, MAX_COURSES};
use crate::utils::gpa::calculate_gpa;

const NAME_PLACEHOLDER: &str = "Course Name";

pub const HELP: &str = "\
Commands:
  add                          add a course row
  remove <row> | rm <row>      remove a course row
  set <row> name <text>        rename a course
  set <row> credits <value>    change the credits of a course
  set <row> grade <letter>     change the grade of a course
  show                         print the form
  json                         print the form values as JSON
  grades                       list the grade scale
  help                         print this message
  quit | exit                  leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add,
    Remove(usize),
    Set(usize, Field, String),
    Show,
    Json,
    Grades,
    Help,
    Quit,
}

pub struct CommandParser {
    keyword: Regex,
    remove: Regex,
    set: Regex,
}

impl CommandParser {
    pub fn new() -> Result<Self> {
        Ok(CommandParser {
            keyword: Regex::new(r"^(?i)\s*(add|show|json|grades|help|quit|exit)\s*$")?,
            remove: Regex::new(r"^(?i)\s*(?:remove|rm)\s+(\d+)\s*$")?,
            set: Regex::new(r"^(?i)\s*set\s+(\d+)\s+(name|credits|grade)(?:\s(.*))?$")?,
        })
    }

    // Row numbers on the command line start at 1, the model is zero based.
    pub fn parse(&self, line: &str) -> Result<Command> {
        if let Some(caps) = self.keyword.captures(line) {
            let command = match caps[1].to_ascii_lowercase().as_str() {
                "add" => Command::Add,
                "show" => Command::Show,
                "json" => Command::Json,
                "grades" => Command::Grades,
                "help" => Command::Help,
                _ => Command::Quit,
            };
            return Ok(command);
        }

        if let Some(caps) = self.remove.captures(line) {
            return Ok(Command::Remove(parse_row(&caps[1])?));
        }

        if let Some(caps) = self.set.captures(line) {
            let row = parse_row(&caps[1])?;
            let field = caps[2].parse::<Field>()?;
            let raw = caps.get(3).map_or("", |m| m.as_str());
            // Grades come from a fixed list of symbols; typed input is normalised to match it.
            let value = match field {
                Field::Grade => raw.trim().to_ascii_uppercase(),
                _ => raw.to_string(),
            };
            return Ok(Command::Set(row, field, value));
        }

        Err(anyhow!("Unrecognised command '{}', type 'help' for the list of commands", line.trim()))
    }
}

fn parse_row(digits: &str) -> Result<usize> {
    let row = digits.parse::<usize>().with_context(|| format!("'{}' is not a row number", digits))?;
    row.checked_sub(1).ok_or_else(|| anyhow!("Rows are numbered from 1"))
}

// Renders the rows and the GPA line the way the form shows them.
pub fn render(courses: &CourseList, gpa: GpaResult) -> String {
    let mut out = String::new();
    let removable = courses.can_remove();
    for (i, entry) in courses.iter().enumerate() {
        let name = if entry.name.is_empty() { NAME_PLACEHOLDER } else { entry.name.as_str() };
        out.push_str(&format!("{:>2}. {:<24} {:>4}  {:<2}", i + 1, name, entry.credits, entry.grade));
        if removable {
            out.push_str(" [x]");
        }
        out.push('\n');
    }
    if !courses.can_append() {
        out.push_str(&format!("(maximum of {} courses reached)\n", MAX_COURSES));
    }
    out.push_str(&format!("GPA: {}", gpa));
    out
}

pub fn render_grades() -> String {
    Letter::ALL
        .iter()
        .map(|letter| format!("{} ({})", letter, letter.points()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Holds the form state and applies one command at a time.
///
/// Every mutation is followed by a recompute of the GPA, so the returned
/// text always reflects the rows as they are after the command.
pub struct FormSession {
    parser: CommandParser,
    courses: CourseList,
    gpa: GpaResult,
}

impl FormSession {
    pub fn new() -> Result<Self> {
        let courses = CourseList::new();
        let gpa = calculate_gpa(&courses);
        Ok(FormSession { parser: CommandParser::new()?, courses, gpa })
    }

    pub fn courses(&self) -> &CourseList {
        &self.courses
    }

    pub fn gpa(&self) -> GpaResult {
        self.gpa
    }

    pub fn render(&self) -> String {
        render(&self.courses, self.gpa)
    }

    // Returns the text to print, or `None` once the user asked to leave.
    pub fn handle_line(&mut self, line: &str) -> Option<String> {
        if line.trim().is_empty() {
            return Some(String::new());
        }
        match self.parser.parse(line) {
            Ok(Command::Quit) => None,
            Ok(command) => Some(self.apply(command).unwrap_or_else(|e| {
                warn!("{:#}", e);
                format!("{:#}", e)
            })),
            Err(e) => Some(format!("{:#}", e)),
        }
    }

    pub fn apply(&mut self, command: Command) -> Result<String> {
        debug!("Applying {:?}", command);
        let notice = match command {
            Command::Add => {
                if self.courses.append() {
                    None
                } else {
                    Some(format!("A form holds at most {} courses", MAX_COURSES))
                }
            }
            Command::Remove(index) => {
                if self.courses.remove_at(index)? {
                    None
                } else {
                    Some("The last course cannot be removed".to_string())
                }
            }
            Command::Set(index, field, value) => {
                self.courses.update_field(index, field, &value)?;
                None
            }
            Command::Show => None,
            Command::Json => return serde_json::to_string_pretty(self.courses.entries()).context("Failed to serialize the form"),
            Command::Grades => return Ok(render_grades()),
            Command::Help => return Ok(HELP.to_string()),
            Command::Quit => return Ok(String::new()),
        };

        self.gpa = calculate_gpa(&self.courses);
        let view = self.render();
        Ok(match notice {
            Some(notice) => format!("{}\n{}", notice, view),
            None => view,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> FormSession {
        FormSession::new().unwrap()
    }

    #[test]
    fn parses_commands() {
        let parser = CommandParser::new().unwrap();
        assert_eq!(parser.parse("add").unwrap(), Command::Add);
        assert_eq!(parser.parse("  ADD ").unwrap(), Command::Add);
        assert_eq!(parser.parse("rm 2").unwrap(), Command::Remove(1));
        assert_eq!(parser.parse("remove 1").unwrap(), Command::Remove(0));
        assert_eq!(parser.parse("exit").unwrap(), Command::Quit);
        assert_eq!(
            parser.parse("set 1 name Linear Algebra II").unwrap(),
            Command::Set(0, Field::Name, "Linear Algebra II".to_string())
        );
        assert_eq!(
            parser.parse("set 3 credits").unwrap(),
            Command::Set(2, Field::Credits, String::new())
        );
        assert_eq!(
            parser.parse("Set 2 Grade B").unwrap(),
            Command::Set(1, Field::Grade, "B".to_string())
        );
    }

    #[test]
    fn normalises_typed_grades() {
        let parser = CommandParser::new().unwrap();
        assert_eq!(
            parser.parse("set 1 grade b ").unwrap(),
            Command::Set(0, Field::Grade, "B".to_string())
        );
        assert_eq!(
            parser.parse("set 1 name  Lab ").unwrap(),
            Command::Set(0, Field::Name, " Lab ".to_string())
        );

        let mut form = session();
        let view = form.handle_line("set 1 grade c").unwrap();
        assert!(view.ends_with("GPA: 2.00"));
    }

    #[test]
    fn rejects_malformed_commands() {
        let parser = CommandParser::new().unwrap();
        assert!(parser.parse("rm 0").is_err());
        assert!(parser.parse("set 1 room B12").is_err());
        assert!(parser.parse("dance").is_err());
        assert!(parser.parse("rm 99999999999999999999999").is_err());
    }

    #[test]
    fn starts_with_the_default_row_and_gpa() {
        let form = session();
        assert_eq!(form.courses().len(), 1);
        assert_eq!(form.gpa().to_string(), "4.00");
        let view = form.render();
        assert!(view.contains(NAME_PLACEHOLDER));
        assert!(!view.contains("[x]"));
        assert!(view.ends_with("GPA: 4.00"));
    }

    #[test]
    fn recomputes_after_every_edit() {
        let mut form = session();
        form.handle_line("set 1 credits 3").unwrap();
        form.handle_line("add").unwrap();
        let view = form.handle_line("set 2 grade C").unwrap();
        assert_eq!(form.gpa().to_string(), "3.50");
        assert!(view.ends_with("GPA: 3.50"));
        assert!(view.contains("[x]"));

        let view = form.handle_line("rm 2").unwrap();
        assert!(view.ends_with("GPA: 4.00"));
    }

    #[test]
    fn blank_credits_show_the_placeholder() {
        let mut form = session();
        let view = form.handle_line("set 1 credits").unwrap();
        assert!(view.ends_with("GPA: ___"));
    }

    #[test]
    fn bounds_are_reported_not_fatal() {
        let mut form = session();
        let view = form.handle_line("rm 1").unwrap();
        assert!(view.starts_with("The last course cannot be removed"));

        for _ in 1..MAX_COURSES {
            form.handle_line("add").unwrap();
        }
        let view = form.handle_line("add").unwrap();
        assert!(view.starts_with("A form holds at most 10 courses"));
        assert!(view.contains("(maximum of 10 courses reached)"));
        assert_eq!(form.courses().len(), MAX_COURSES);
    }

    #[test]
    fn out_of_range_rows_are_reported() {
        let mut form = session();
        let message = form.handle_line("set 4 grade B").unwrap();
        assert!(message.contains("out of range"));
        assert_eq!(form.courses().len(), 1);
    }

    #[test]
    fn quit_ends_the_session() {
        let mut form = session();
        assert!(form.handle_line("quit").is_none());
    }

    #[test]
    fn json_snapshot_lists_rows() {
        let mut form = session();
        form.handle_line("set 1 name Physics").unwrap();
        let json = form.handle_line("json").unwrap();
        let rows: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(rows[0]["name"], "Physics");
        assert_eq!(rows[0]["credits"], "1");
        assert_eq!(rows[0]["grade"], "A");
    }

    #[test]
    fn grade_options_match_the_scale() {
        assert_eq!(render_grades(), "A (4)\nB (3)\nC (2)\nD (1)\nF (0)");
    }
}
