//! Options document for the client-side staff renderer
//!
//! ```xml
//! <options>
//!   <questiontype>note-identify</questiontype>
//!   <clef>treble</clef>
//!   <considerregister>true</considerregister>
//!   <givennote><letter>C</letter><accidental>#</accidental><register>4</register></givennote>
//! </options>
//! ```
//!
//! The given note is only included for note identification, where the
//! renderer draws it; note writing states it in the question text instead.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

use crate::models::{Clef, Note};
use crate::question::QuestionKind;

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Build the options document for one attempt
pub fn options_xml(
    kind: QuestionKind,
    clef: Clef,
    consider_register: bool,
    given_note: &Note,
) -> quick_xml::Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::Start(BytesStart::new("options")))?;
    write_text_element(&mut writer, "questiontype", kind.as_str())?;
    write_text_element(&mut writer, "clef", clef.as_str())?;
    write_text_element(
        &mut writer,
        "considerregister",
        if consider_register { "true" } else { "false" },
    )?;

    if kind == QuestionKind::NoteIdentify {
        writer.write_event(Event::Start(BytesStart::new("givennote")))?;
        write_text_element(&mut writer, "letter", given_note.letter.as_str())?;
        write_text_element(&mut writer, "accidental", given_note.accidental.token())?;
        if let Some(register) = given_note.register {
            write_text_element(&mut writer, "register", &register.to_string())?;
        }
        writer.write_event(Event::End(BytesEnd::new("givennote")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("options")))?;

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
