use serde::Deserialize;
use time::PrimitiveDateTime;

use super::repo_types::{NewTodo, TodoChanges};

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "wire_datetime")]
    pub due_date: PrimitiveDateTime,
    #[serde(default)]
    pub status: bool,
}

impl From<CreateTodoRequest> for NewTodo {
    fn from(r: CreateTodoRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            due_date: r.due_date,
            status: r.status,
        }
    }
}

/// Every field optional; present fields are written even when false or empty.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "wire_datetime::option")]
    pub due_date: Option<PrimitiveDateTime>,
    #[serde(default)]
    pub status: Option<bool>,
}

impl From<UpdateTodoRequest> for TodoChanges {
    fn from(r: UpdateTodoRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            due_date: r.due_date,
            status: r.status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

/// `due_date` on the wire: `YYYY-MM-DDTHH:MM:SS`, no offset.
///
/// Input may also carry fractional seconds, or be RFC 3339 with an offset,
/// which is normalized to UTC before the offset is dropped.
pub mod wire_datetime {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use time::{
        format_description::well_known::Rfc3339, macros::format_description, OffsetDateTime,
        PrimitiveDateTime, UtcOffset,
    };

    pub fn parse(s: &str) -> Option<PrimitiveDateTime> {
        let plain = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
        let fractional =
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");

        PrimitiveDateTime::parse(s, &plain)
            .or_else(|_| PrimitiveDateTime::parse(s, &fractional))
            .ok()
            .or_else(|| {
                let dt = OffsetDateTime::parse(s, &Rfc3339).ok()?.to_offset(UtcOffset::UTC);
                Some(PrimitiveDateTime::new(dt.date(), dt.time()))
            })
    }

    pub fn format(dt: &PrimitiveDateTime) -> Result<String, time::error::Format> {
        dt.format(&format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second]"
        ))
    }

    pub fn serialize<S: Serializer>(dt: &PrimitiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        let text = format(dt).map_err(serde::ser::Error::custom)?;
        s.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<PrimitiveDateTime, D::Error> {
        let s = String::deserialize(d)?;
        parse(&s).ok_or_else(|| de::Error::custom(format!("invalid datetime: {s}")))
    }

    pub mod option {
        use serde::{de, Deserialize, Deserializer};
        use time::PrimitiveDateTime;

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<PrimitiveDateTime>, D::Error> {
            match Option::<String>::deserialize(d)? {
                None => Ok(None),
                Some(s) => super::parse(&s)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid datetime: {s}"))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn parses_naive_and_fractional_and_offset_forms() {
        assert_eq!(
            wire_datetime::parse("2024-01-01T00:00:00"),
            Some(datetime!(2024-01-01 0:00))
        );
        assert_eq!(
            wire_datetime::parse("2024-12-31T23:59:59.250"),
            Some(datetime!(2024-12-31 23:59:59.25))
        );
        assert_eq!(
            wire_datetime::parse("2024-01-01T02:00:00+02:00"),
            Some(datetime!(2024-01-01 0:00))
        );
        assert_eq!(wire_datetime::parse("yesterday"), None);
    }

    #[test]
    fn formats_without_offset() {
        let text = wire_datetime::format(&datetime!(2024-12-31 23:59:59)).unwrap();
        assert_eq!(text, "2024-12-31T23:59:59");
    }

    #[test]
    fn create_request_defaults_status_and_description() {
        let req: CreateTodoRequest = serde_json::from_value(serde_json::json!({
            "name": "x",
            "due_date": "2024-01-01T00:00:00"
        }))
        .unwrap();
        assert!(!req.status);
        assert!(req.description.is_none());
    }

    #[test]
    fn update_request_keeps_explicit_false_and_empty() {
        let req: UpdateTodoRequest = serde_json::from_value(serde_json::json!({
            "description": "",
            "status": false
        }))
        .unwrap();
        assert_eq!(req.description.as_deref(), Some(""));
        assert_eq!(req.status, Some(false));
        assert!(req.name.is_none());
        assert!(req.due_date.is_none());
    }

    #[test]
    fn bad_due_date_is_rejected() {
        let res: Result<CreateTodoRequest, _> = serde_json::from_value(serde_json::json!({
            "name": "x",
            "due_date": "soon"
        }));
        assert!(res.is_err());
    }
}
