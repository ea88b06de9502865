//! Placeholder phrases that mark non-conversational entries.
//!
//! Messaging clients write system and media events into the export as if
//! they were ordinary messages: `<Media omitted>`, `Missed voice call`, a
//! group rename, a security-code notice. A message whose assembled content
//! contains one of these phrases is dropped wholesale.
//!
//! Matching is a case-sensitive substring test over the *joined* content,
//! so a phrase that arrives on a continuation line still removes the whole
//! message. The trade-off is that a person quoting a phrase verbatim
//! ("it just says media omitted") loses that message too when the quote
//! matches exactly.
//!
//! # Example
//!
//! ```rust
//! use chatsift::denylist::{Denylist, PlaceholderKind};
//!
//! let denylist = Denylist::default()
//!     .with_phrase(PlaceholderKind::MediaOmitted, "<Medien ausgeschlossen>");
//!
//! let hit = denylist.find_match("<Media omitted>").unwrap();
//! assert_eq!(hit.kind, PlaceholderKind::MediaOmitted);
//! assert!(denylist.find_match("see you at 8").is_none());
//! ```

use std::fmt;
#[cfg(feature = "json-output")]
use std::fs;
#[cfg(feature = "json-output")]
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChatsiftError, Result};

/// Category of a system/media placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderKind {
    /// Photo, video, audio, sticker or GIF left out of the export
    MediaOmitted,
    /// Missed voice or video call
    MissedCall,
    /// Shared (live) location
    Location,
    /// Attached document
    FileAttachment,
    /// Shared contact card
    ContactCard,
    /// Someone joined, left, was added or removed
    GroupMembership,
    /// Group name, icon or description changed
    GroupSettings,
    /// End-to-end encryption security code changed
    SecurityCode,
    /// Message could not be decrypted yet
    WaitingForMessage,
    /// Message deleted by its sender
    DeletedMessage,
}

impl PlaceholderKind {
    /// Returns every kind.
    pub fn all() -> &'static [PlaceholderKind] {
        &[
            PlaceholderKind::MediaOmitted,
            PlaceholderKind::MissedCall,
            PlaceholderKind::Location,
            PlaceholderKind::FileAttachment,
            PlaceholderKind::ContactCard,
            PlaceholderKind::GroupMembership,
            PlaceholderKind::GroupSettings,
            PlaceholderKind::SecurityCode,
            PlaceholderKind::WaitingForMessage,
            PlaceholderKind::DeletedMessage,
        ]
    }
}

impl fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaceholderKind::MediaOmitted => "media omitted",
            PlaceholderKind::MissedCall => "missed call",
            PlaceholderKind::Location => "location",
            PlaceholderKind::FileAttachment => "file attachment",
            PlaceholderKind::ContactCard => "contact card",
            PlaceholderKind::GroupMembership => "group membership",
            PlaceholderKind::GroupSettings => "group settings",
            PlaceholderKind::SecurityCode => "security code",
            PlaceholderKind::WaitingForMessage => "waiting for message",
            PlaceholderKind::DeletedMessage => "deleted message",
        };
        f.write_str(name)
    }
}

/// A single denylisted phrase and what it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DenylistEntry {
    /// Category of the placeholder
    pub kind: PlaceholderKind,
    /// Literal text searched for in message content
    pub phrase: String,
}

impl DenylistEntry {
    /// Creates an entry.
    pub fn new(kind: PlaceholderKind, phrase: impl Into<String>) -> Self {
        Self {
            kind,
            phrase: phrase.into(),
        }
    }
}

/// English and Portuguese (pt-BR) placeholders written by WhatsApp clients.
const DEFAULT_PHRASES: &[(PlaceholderKind, &str)] = &[
    // English
    (PlaceholderKind::MediaOmitted, "<Media omitted>"),
    (PlaceholderKind::MediaOmitted, "image omitted"),
    (PlaceholderKind::MediaOmitted, "video omitted"),
    (PlaceholderKind::MediaOmitted, "audio omitted"),
    (PlaceholderKind::MediaOmitted, "sticker omitted"),
    (PlaceholderKind::MediaOmitted, "GIF omitted"),
    (PlaceholderKind::MissedCall, "Missed voice call"),
    (PlaceholderKind::MissedCall, "Missed video call"),
    (PlaceholderKind::Location, "location: https://maps.google.com"),
    (PlaceholderKind::Location, "Live location shared"),
    (PlaceholderKind::FileAttachment, "(file attached)"),
    (PlaceholderKind::FileAttachment, "document omitted"),
    (PlaceholderKind::ContactCard, "Contact card omitted"),
    (PlaceholderKind::ContactCard, ".vcf (file attached)"),
    (PlaceholderKind::GroupMembership, "joined using this group's invite link"),
    (PlaceholderKind::GroupMembership, "left the group"),
    (PlaceholderKind::GroupMembership, "You were added"),
    (PlaceholderKind::GroupMembership, "You were removed"),
    (PlaceholderKind::GroupSettings, "changed the group name"),
    (PlaceholderKind::GroupSettings, "changed the subject from"),
    (PlaceholderKind::GroupSettings, "changed this group's icon"),
    (PlaceholderKind::GroupSettings, "changed the group description"),
    (PlaceholderKind::SecurityCode, "security code changed"),
    (PlaceholderKind::SecurityCode, "Your security code with"),
    (PlaceholderKind::WaitingForMessage, "Waiting for this message"),
    (PlaceholderKind::DeletedMessage, "This message was deleted"),
    (PlaceholderKind::DeletedMessage, "You deleted this message"),
    // Portuguese
    (PlaceholderKind::MediaOmitted, "<Mídia omitida>"),
    (PlaceholderKind::MediaOmitted, "<Mídia oculta>"),
    (PlaceholderKind::MediaOmitted, "imagem ocultada"),
    (PlaceholderKind::MediaOmitted, "vídeo omitido"),
    (PlaceholderKind::MediaOmitted, "áudio ocultado"),
    (PlaceholderKind::MediaOmitted, "figurinha omitida"),
    (PlaceholderKind::MediaOmitted, "GIF omitido"),
    (PlaceholderKind::MissedCall, "Chamada de voz perdida"),
    (PlaceholderKind::MissedCall, "Chamada de vídeo perdida"),
    (PlaceholderKind::Location, "localização: https://maps.google.com"),
    (PlaceholderKind::Location, "Localização em tempo real compartilhada"),
    (PlaceholderKind::FileAttachment, "(arquivo anexado)"),
    (PlaceholderKind::FileAttachment, "documento omitido"),
    (PlaceholderKind::ContactCard, "Cartão de contato omitido"),
    (PlaceholderKind::ContactCard, ".vcf (arquivo anexado)"),
    (PlaceholderKind::GroupMembership, "entrou usando o link de convite deste grupo"),
    (PlaceholderKind::GroupMembership, "saiu do grupo"),
    (PlaceholderKind::GroupMembership, "Você foi adicionado"),
    (PlaceholderKind::GroupMembership, "Você foi removido"),
    (PlaceholderKind::GroupSettings, "mudou o nome do grupo"),
    (PlaceholderKind::GroupSettings, "mudou a imagem deste grupo"),
    (PlaceholderKind::GroupSettings, "mudou a descrição do grupo"),
    (PlaceholderKind::SecurityCode, "código de segurança mudou"),
    (PlaceholderKind::SecurityCode, "Seu código de segurança com"),
    (PlaceholderKind::WaitingForMessage, "Aguardando mensagem"),
    (PlaceholderKind::WaitingForMessage, "Aguardando esta mensagem"),
    (PlaceholderKind::DeletedMessage, "Mensagem apagada"),
    (PlaceholderKind::DeletedMessage, "Você apagou esta mensagem"),
];

/// Ordered, inspectable list of placeholder phrases.
///
/// Serializes as a JSON array of `{"kind": ..., "phrase": ...}` objects, so a
/// deployment can dump the defaults, edit them, and load them back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Denylist {
    entries: Vec<DenylistEntry>,
}

impl Default for Denylist {
    fn default() -> Self {
        Self {
            entries: DEFAULT_PHRASES
                .iter()
                .map(|&(kind, phrase)| DenylistEntry::new(kind, phrase))
                .collect(),
        }
    }
}

impl Denylist {
    /// Creates a denylist from explicit entries.
    pub fn new(entries: Vec<DenylistEntry>) -> Self {
        Self { entries }
    }

    /// Creates a denylist that never matches.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a phrase.
    #[must_use]
    pub fn with_phrase(mut self, kind: PlaceholderKind, phrase: impl Into<String>) -> Self {
        self.entries.push(DenylistEntry::new(kind, phrase));
        self
    }

    /// Returns all entries in configuration order.
    pub fn entries(&self) -> &[DenylistEntry] {
        &self.entries
    }

    /// Iterates over the raw phrases.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.phrase.as_str())
    }

    /// Returns entries of one kind.
    pub fn entries_of(&self, kind: PlaceholderKind) -> impl Iterator<Item = &DenylistEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    /// Number of phrases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no phrases.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the first entry whose phrase occurs in `content`.
    ///
    /// Case-sensitive substring search. Empty phrases never match.
    pub fn find_match(&self, content: &str) -> Option<&DenylistEntry> {
        self.entries
            .iter()
            .find(|e| !e.phrase.is_empty() && content.contains(e.phrase.as_str()))
    }

    /// Returns `true` if `content` contains any phrase.
    pub fn matches(&self, content: &str) -> bool {
        self.find_match(content).is_some()
    }

    /// Rejects empty phrases, which would otherwise be inert and hide typos.
    pub fn validate(&self) -> Result<()> {
        if let Some(pos) = self.entries.iter().position(|e| e.phrase.trim().is_empty()) {
            return Err(ChatsiftError::invalid_denylist(format!(
                "entry #{} ({}) has an empty phrase",
                pos + 1,
                self.entries[pos].kind
            )));
        }
        Ok(())
    }

    /// Parses and validates a denylist from JSON.
    ///
    /// A loaded denylist must carry at least one phrase; use
    /// [`Denylist::empty`] to disable filtering on purpose.
    #[cfg(feature = "json-output")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let denylist: Denylist = serde_json::from_str(json)?;
        if denylist.is_empty() {
            return Err(ChatsiftError::invalid_denylist("denylist has no entries"));
        }
        denylist.validate()?;
        Ok(denylist)
    }

    /// Loads and validates a denylist from a JSON file.
    #[cfg(feature = "json-output")]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serializes the denylist as pretty JSON.
    #[cfg(feature = "json-output")]
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
