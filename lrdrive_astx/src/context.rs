use lrdrive_runtime::loc::Pos;

use crate::error::CompilationError;

/// Source being parsed, used to point errors back into it.
#[derive(Clone, Debug)]
pub struct Context {
    pub source: String,
}

impl Context {
    pub fn new(source: String) -> Context {
        Context {
            source
        }
    }

    /// Renders the line containing `loc` with a caret under the position.
    pub fn render_loc(&self, loc: Pos) -> Vec<String> {
        if loc.line == 0 {
            return Vec::new();
        }
        let lines: Vec<&str> = self.source.lines().collect();
        let index = loc.line as usize - 1;
        let line_loc_str = format!("{}", loc.line);
        let padding = " ".repeat(line_loc_str.len());

        let mut res = Vec::new();
        if index > 0 {
            if let Some(line) = lines.get(index - 1) {
                res.push(format!(" {} |{}", padding, line));
            }
        }
        res.push(format!(" {} |{}", line_loc_str, lines.get(index).unwrap_or(&"")));
        res.push(format!(" {} |{}^", padding, " ".repeat(loc.column.saturating_sub(1) as usize)));
        res
    }

    pub fn print_error(&self, error: &dyn CompilationError) {
        eprintln!("--------------------");
        eprintln!("{}: {}!", error.error_type(), error.summarize());
        if let Some(loc) = error.loc() {
            for line in self.render_loc(loc) {
                eprintln!("{}", line);
            }
        }
        eprintln!(">{}", error.description())
    }
}
