//! Dependency-tree data structures for parsed sentences
//!
//! A [`Sentence`] is an ordered sequence of [`Token`]s plus the
//! head/child links between them, as produced by the external parser.

/// Unique identifier for a token within its sentence (0-based position)
pub type TokenId = usize;

/// One word occurrence in a parsed sentence
#[derive(Debug, Clone)]
pub struct Token {
    pub id: TokenId,
    pub form: String,
    pub lemma: String,
    pub pos: String,
    pub deprel: String,
    pub parent: Option<TokenId>,
    pub children: Vec<TokenId>,
}

impl Token {
    /// Create a new token with the given attributes
    pub fn new(id: TokenId, form: &str, lemma: &str, pos: &str, deprel: &str) -> Self {
        Self {
            id,
            form: form.to_string(),
            lemma: lemma.to_string(),
            pos: pos.to_string(),
            deprel: deprel.to_string(),
            parent: None,
            children: Vec::new(),
        }
    }
}

/// A parsed sentence
#[derive(Debug, Clone, Default)]
pub struct Sentence {
    pub tokens: Vec<Token>,
    pub root_id: Option<TokenId>,
    /// Raw sentence text, when the parser reported it
    pub text: Option<String>,
}

impl Sentence {
    /// Create a new empty sentence
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sentence carrying the raw text annotation
    pub fn with_text(text: Option<String>) -> Self {
        Self {
            tokens: Vec::new(),
            root_id: None,
            text,
        }
    }

    /// Add a token to the sentence
    pub fn add_token(&mut self, token: Token) -> TokenId {
        let id = token.id;
        self.tokens.push(token);
        id
    }

    /// Get a token by ID
    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id)
    }

    fn get_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.tokens.get_mut(id)
    }

    /// Set the parent of a token, registering it as a child of the parent
    pub fn set_parent(&mut self, child_id: TokenId, parent_id: TokenId) {
        if let Some(child) = self.get_mut(child_id) {
            child.parent = Some(parent_id);
        }
        if let Some(parent) = self.get_mut(parent_id) {
            parent.children.push(child_id);
        }
    }

    /// Get the direct dependents of a token
    pub fn children(&self, id: TokenId) -> Vec<&Token> {
        if let Some(token) = self.get(id) {
            token
                .children
                .iter()
                .filter_map(|&child| self.get(child))
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Get the syntactic head of a token
    pub fn parent(&self, id: TokenId) -> Option<&Token> {
        self.get(id)
            .and_then(|token| token.parent)
            .and_then(|parent_id| self.get(parent_id))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Lowercased surface forms in sentence order
    pub fn lowercased_forms(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.form.to_lowercase()).collect()
    }
}
