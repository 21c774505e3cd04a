//! Function set and static manifest.
//!
//! The manifest is generated from [`Function::ALL`], so adding or removing
//! an operation forces the descriptor list and the dispatch match to move
//! in lockstep.

use serde_json::{json, Value};

/// The closed set of callable functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    GetBoards,
    GetLists,
    GetCards,
    CreateCard,
    UpdateCard,
    MoveCard,
}

impl Function {
    /// All functions, in manifest order.
    pub const ALL: [Function; 6] = [
        Function::GetBoards,
        Function::GetLists,
        Function::GetCards,
        Function::CreateCard,
        Function::UpdateCard,
        Function::MoveCard,
    ];

    /// Wire name used in the envelope and the manifest.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Function::GetBoards => "get_trello_boards",
            Function::GetLists => "get_trello_lists",
            Function::GetCards => "get_trello_cards",
            Function::CreateCard => "create_trello_card",
            Function::UpdateCard => "update_trello_card",
            Function::MoveCard => "move_trello_card",
        }
    }

    /// Resolve a wire name to a function.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    fn descriptor(self) -> Value {
        match self {
            Function::GetBoards => json!({
                "name": self.name(),
                "description": "Get all Trello boards for the authenticated user",
                "parameters": {
                    "type": "object",
                    "properties": {},
                    "required": []
                }
            }),
            Function::GetLists => json!({
                "name": self.name(),
                "description": "Get all lists for a specific Trello board",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "board_id": {
                            "type": "string",
                            "description": "ID of the Trello board"
                        }
                    },
                    "required": ["board_id"]
                }
            }),
            Function::GetCards => json!({
                "name": self.name(),
                "description": "Get all cards in a specific Trello list",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "list_id": {
                            "type": "string",
                            "description": "ID of the Trello list"
                        }
                    },
                    "required": ["list_id"]
                }
            }),
            Function::CreateCard => json!({
                "name": self.name(),
                "description": "Create a new card in a Trello list",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "list_id": {
                            "type": "string",
                            "description": "ID of the Trello list"
                        },
                        "name": {
                            "type": "string",
                            "description": "Name/title of the card"
                        },
                        "description": {
                            "type": "string",
                            "description": "Description of the card"
                        },
                        "due": {
                            "type": "string",
                            "description": "Due date for the card in ISO format (optional)"
                        }
                    },
                    "required": ["list_id", "name"]
                }
            }),
            Function::UpdateCard => json!({
                "name": self.name(),
                "description": "Update an existing Trello card",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "card_id": {
                            "type": "string",
                            "description": "ID of the card to update"
                        },
                        "name": {
                            "type": "string",
                            "description": "New name/title for the card (optional)"
                        },
                        "description": {
                            "type": "string",
                            "description": "New description for the card (optional)"
                        },
                        "due": {
                            "type": "string",
                            "description": "New due date in ISO format (optional)"
                        }
                    },
                    "required": ["card_id"]
                }
            }),
            Function::MoveCard => json!({
                "name": self.name(),
                "description": "Move a card to a different list",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "card_id": {
                            "type": "string",
                            "description": "ID of the card to move"
                        },
                        "list_id": {
                            "type": "string",
                            "description": "ID of the destination list"
                        }
                    },
                    "required": ["card_id", "list_id"]
                }
            }),
        }
    }
}

/// Build the static manifest document served at `GET /mcp/v1/manifest`.
#[must_use]
pub fn manifest() -> Value {
    json!({
        "schema_version": "v1",
        "name": "Trello",
        "description": "Interact with Trello boards, lists, and cards",
        "functions": Function::ALL
            .iter()
            .map(|f| f.descriptor())
            .collect::<Vec<_>>()
    })
}
