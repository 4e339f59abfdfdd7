use std::collections::{BTreeMap, HashMap, HashSet};

use gridcfg_models::{DataSourceRef, full_class_name};

const INDENT: &str = "    ";

/// Text accumulator shared by all generators.
///
/// Besides indentation it carries the bookkeeping of one generation pass:
/// Java imports, already declared local variables and the external
/// datasources referenced by store factories. A pass always starts from a
/// fresh buffer.
#[derive(Debug)]
pub struct OutputBuffer {
    out: String,
    depth: usize,
    line_start: bool,
    need_empty_line: bool,
    /// short name -> fully qualified name
    imports: BTreeMap<String, String>,
    variables: HashSet<String>,
    /// variable name -> id of the bean it was handed out for
    owners: HashMap<String, String>,
    datasources: Vec<DataSourceRef>,
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
            line_start: true,
            need_empty_line: false,
            imports: BTreeMap::new(),
            variables: HashSet::new(),
            owners: HashMap::new(),
            datasources: Vec::new(),
        }
    }

    pub fn with_depth(depth: usize) -> Self {
        Self {
            depth,
            ..Self::new()
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Appends to the current line, indenting first when at line start.
    pub fn append(&mut self, s: &str) -> &mut Self {
        if self.line_start {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.line_start = false;
        }
        self.out.push_str(s);
        self
    }

    pub fn line(&mut self, s: &str) -> &mut Self {
        if !s.is_empty() {
            self.append(s);
        }
        self.out.push('\n');
        self.line_start = true;
        self
    }

    /// Appends already indented text verbatim.
    pub fn push_rendered(&mut self, text: &str) -> &mut Self {
        if text.is_empty() {
            return self;
        }
        self.out.push_str(text);
        self.line_start = text.ends_with('\n');
        self
    }

    pub fn blank_line(&mut self) -> &mut Self {
        self.line("")
    }

    pub fn start_block(&mut self, s: &str) -> &mut Self {
        self.line(s);
        self.depth += 1;
        self.need_empty_line = false;
        self
    }

    pub fn end_block(&mut self, s: &str) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line(s)
    }

    pub fn request_empty_line(&mut self) {
        self.need_empty_line = true;
    }

    /// Emits the pending blank line, if any. Calling it twice in a row
    /// never produces two blank lines.
    pub fn empty_line_if_needed(&mut self) -> bool {
        if self.need_empty_line {
            self.need_empty_line = false;
            self.blank_line();
            return true;
        }
        false
    }

    /// Records `class_name` for the import block and returns the name to
    /// use in code. On a short-name clash with an earlier import the fully
    /// qualified name is returned instead.
    pub fn import_class(&mut self, class_name: &str) -> String {
        let full = full_class_name(class_name);
        let Some(dot) = full.rfind('.') else {
            return full.to_string();
        };
        let short = &full[dot + 1..];

        match self.imports.get(short) {
            Some(existing) if existing != full => full.to_string(),
            Some(_) => short.to_string(),
            None => {
                self.imports.insert(short.to_string(), full.to_string());
                short.to_string()
            }
        }
    }

    /// Sorted `import` statements, `java.lang` excluded.
    pub fn generate_imports(&self) -> String {
        let mut lines: Vec<String> = self
            .imports
            .values()
            .filter(|full| !full.starts_with("java.lang."))
            .map(|full| format!("import {};", full))
            .collect();
        lines.sort();
        lines.join("\n")
    }

    /// First call for a name returns `true`; later calls return `false`.
    pub fn need_new_variable(&mut self, name: &str) -> bool {
        self.variables.insert(name.to_string())
    }

    /// Variable name for the bean `owner`, starting from `base`. The same
    /// owner always gets the same name; another owner whose id sanitizes
    /// to the same `base` gets a numeric suffix.
    pub fn owned_variable(&mut self, base: &str, owner: &str) -> String {
        let mut candidate = base.to_string();
        let mut n = 1;
        loop {
            match self.owners.get(&candidate) {
                Some(o) if o == owner => return candidate,
                Some(_) => {
                    n += 1;
                    candidate = format!("{}{}", base, n);
                }
                None => {
                    self.owners.insert(candidate.clone(), owner.to_string());
                    return candidate;
                }
            }
        }
    }

    /// Returns `true` when the bean id was not registered before.
    pub fn register_datasource(&mut self, ds: DataSourceRef) -> bool {
        if self.datasources.iter().any(|d| d.bean_id == ds.bean_id) {
            return false;
        }
        self.datasources.push(ds);
        true
    }

    pub fn datasources(&self) -> &[DataSourceRef] {
        &self.datasources
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }
}
