use std::any::Any;

use super::{Method, SmsApi, SmsError};
use crate::domain::{SmsId, SmsProperties, SmsType, ValidationError};

const SMS_API_PARAMETER: &str = "SmsApi";

#[derive(Debug, Clone)]
/// An existing incoming or outgoing message, addressed by id.
pub struct Sms<'a> {
    api: &'a SmsApi,
    sms_type: SmsType,
    id: SmsId,
}

impl<'a> Sms<'a> {
    /// Build a handle on an existing message of `api`'s selected account.
    pub fn new(api: &'a SmsApi, sms_type: &str, id: &str) -> Result<Self, ValidationError> {
        Self::from_owner(Some(api as &'a dyn Any), Some(sms_type), Some(id))
    }

    /// Build a handle from loosely typed parts.
    ///
    /// Checks run in a fixed order: owner present, owner is an [`SmsApi`], type,
    /// then id. A wrong owner is reported even when type and id are also invalid.
    pub fn from_owner(
        owner: Option<&'a dyn Any>,
        sms_type: Option<&str>,
        id: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let owner = owner.ok_or(ValidationError::Empty {
            field: SMS_API_PARAMETER,
        })?;
        let api = owner
            .downcast_ref::<SmsApi>()
            .ok_or(ValidationError::NotSmsApi)?;
        let sms_type = SmsType::parse(sms_type.unwrap_or_default())?;
        let id = SmsId::new(id.unwrap_or_default())?;

        Ok(Self::from_parts(api, sms_type, id))
    }

    pub(super) fn from_parts(api: &'a SmsApi, sms_type: SmsType, id: SmsId) -> Self {
        Self { api, sms_type, id }
    }

    pub fn api(&self) -> &'a SmsApi {
        self.api
    }

    pub fn sms_type(&self) -> SmsType {
        self.sms_type
    }

    pub fn id(&self) -> &SmsId {
        &self.id
    }

    /// Fetch the message details.
    pub async fn properties(&self) -> Result<SmsProperties, SmsError> {
        let path = self.path()?;
        let body = self
            .api
            .connection()
            .call_raw(Method::Get, &path, &[], None)
            .await?;
        crate::transport::decode_sms_properties_json_response(&body)
            .map_err(|err| SmsError::Parse(Box::new(err)))
    }

    /// Delete the message from the account history.
    pub async fn delete(&self) -> Result<(), SmsError> {
        let path = self.path()?;
        let body = self
            .api
            .connection()
            .call_raw(Method::Delete, &path, &[], None)
            .await?;
        tracing::debug!(%path, "sms deleted");
        crate::transport::decode_ignored_json_response(&body)
            .map_err(|err| SmsError::Parse(Box::new(err)))
    }

    fn path(&self) -> Result<String, ValidationError> {
        let account = self.api.require_account()?;
        Ok(format!(
            "/sms/{account}/{}/{}",
            self.sms_type.as_str(),
            self.id
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::fake::FakeTransport;
    use super::super::sms_api::tests::{make_api, make_api_with_account};
    use super::*;

    #[test]
    fn missing_owner_is_reported_first() {
        let err = Sms::from_owner(None, None, None).unwrap_err();
        assert_eq!(err.to_string(), "SmsApi parameter is empty");
    }

    #[test]
    fn owner_of_the_wrong_type_is_reported_before_type_and_id() {
        let not_an_api = "test";
        let err = Sms::from_owner(Some(&not_an_api), Some("incoming"), Some("0")).unwrap_err();
        assert_eq!(err.to_string(), "SmsApi parameter must be a SmsApi object");

        let err = Sms::from_owner(Some(&42_u32), None, None).unwrap_err();
        assert_eq!(err, ValidationError::NotSmsApi);
    }

    #[test]
    fn missing_type_is_reported_before_id() {
        let api = make_api(&FakeTransport::new());
        let err = Sms::from_owner(Some(&api), None, None).unwrap_err();
        assert_eq!(err.to_string(), "Type parameter is empty");

        let err = Sms::new(&api, "", "").unwrap_err();
        assert_eq!(err.to_string(), "Type parameter is empty");
    }

    #[test]
    fn missing_id_is_reported() {
        let api = make_api(&FakeTransport::new());
        let err = Sms::from_owner(Some(&api), Some("incoming"), None).unwrap_err();
        assert_eq!(err.to_string(), "Id parameter is empty");
    }

    #[test]
    fn valid_parts_are_readable() {
        let api = make_api(&FakeTransport::new());
        let sms = Sms::new(&api, "incoming", "12345").unwrap();
        assert_eq!(sms.sms_type(), SmsType::Incoming);
        assert_eq!(sms.id().as_str(), "12345");
        assert!(std::ptr::eq(sms.api(), &api));

        let sms = Sms::new(&api, "outgoing", "9").unwrap();
        assert_eq!(sms.sms_type(), SmsType::Outgoing);
        assert!(matches!(
            Sms::new(&api, "both", "9"),
            Err(ValidationError::InvalidSmsType { .. })
        ));
    }

    #[tokio::test]
    async fn properties_require_account() {
        let transport = FakeTransport::new();
        let api = make_api(&transport);
        let sms = Sms::new(&api, "incoming", "1").unwrap();

        let err = sms.properties().await.unwrap_err();
        assert_eq!(err.as_validation(), Some(&ValidationError::AccountNotSet));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn properties_are_fetched_from_typed_collection() {
        let json = r#"
        {
          "id": 1,
          "creationDatetime": "2026-02-03T10:00:00+01:00",
          "message": "STOP",
          "sender": "+33612345678",
          "tag": "",
          "credits": 0
        }
        "#;
        let transport =
            FakeTransport::new().route(Method::Get, "/sms/sms-ab1-1/incoming/1", 200, json);
        let api = make_api_with_account(&transport);

        let props = Sms::new(&api, "incoming", "1")
            .unwrap()
            .properties()
            .await
            .unwrap();
        assert_eq!(props.id.as_str(), "1");
        assert_eq!(props.message.as_deref(), Some("STOP"));
        assert_eq!(props.sender.as_deref(), Some("+33612345678"));
        assert_eq!(props.credits.as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn delete_uses_delete_verb() {
        let transport =
            FakeTransport::new().route(Method::Delete, "/sms/sms-ab1-1/outgoing/77", 200, "null");
        let api = make_api_with_account(&transport);

        Sms::new(&api, "outgoing", "77")
            .unwrap()
            .delete()
            .await
            .unwrap();

        let requests = transport.api_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Delete);
        assert_eq!(
            requests[0].url,
            "https://example.invalid/1.0/sms/sms-ab1-1/outgoing/77"
        );
    }

    #[tokio::test]
    async fn missing_message_maps_to_api_error() {
        let transport = FakeTransport::new().route(
            Method::Get,
            "/sms/sms-ab1-1/outgoing/404",
            404,
            r#"{"message": "The requested object (id = 404) does not exist"}"#,
        );
        let api = make_api_with_account(&transport);

        let err = Sms::new(&api, "outgoing", "404")
            .unwrap()
            .properties()
            .await
            .unwrap_err();
        assert!(matches!(err, SmsError::Api { status: 404, .. }));
    }
}
