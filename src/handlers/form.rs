use std::collections::HashMap;

use axum::extract::Multipart;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{models::media::UploadFile, Error, Result};

/// A multipart body split into its text fields and file parts.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadFile>,
}

impl FormData {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = FormData::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match field.file_name().map(str::to_owned) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_owned);
                    let bytes = field.bytes().await?;
                    // Browsers send an empty part when no file was picked.
                    if bytes.is_empty() && file_name.is_empty() {
                        continue;
                    }
                    form.files.insert(
                        name,
                        UploadFile {
                            file_name,
                            content_type,
                            bytes,
                        },
                    );
                }
                None => {
                    let value = field.text().await?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadFile> {
        self.files.remove(name)
    }

    /// Deserializes the text fields into `T`.
    pub fn fields<T: DeserializeOwned>(&self) -> Result<T> {
        let object = self
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect::<Map<_, _>>();

        serde_json::from_value(Value::Object(object))
            .map_err(|err| Error::BadRequest(format!("Invalid form data: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Bytes;

    use super::*;
    use crate::models::certificate::UpdateCertificateDto;

    #[test]
    fn text_fields_deserialize_into_dtos() {
        let mut form = FormData::default();
        form.fields.insert("name".to_string(), "AWS Cert".to_string());
        form.fields
            .insert("startDate".to_string(), "2023-01-01".to_string());
        form.files.insert(
            "image".to_string(),
            UploadFile {
                file_name: "aws.png".to_string(),
                content_type: None,
                bytes: Bytes::from_static(b"png"),
            },
        );

        let dto: UpdateCertificateDto = form.fields().unwrap();
        assert_eq!(dto.name.as_deref(), Some("AWS Cert"));
        assert_eq!(dto.start_date.as_deref(), Some("2023-01-01"));
        assert!(dto.end_date.is_none());

        assert!(form.take_file("image").is_some());
        assert!(form.take_file("image").is_none());
    }
}
