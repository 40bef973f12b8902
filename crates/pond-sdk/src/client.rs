//! JSON-RPC client for a Sui fullnode.
//!
//! The client resolves a [`PreparedTransaction`] into signable bytes
//! (looking up object versions, picking a gas coin, fetching the
//! reference gas price), signs it with an [`Ed25519Keypair`] and
//! submits it, waiting for local execution before returning.

use crate::config::SuiConfig;
use crate::error::{SdkError, SdkResult};
use crate::keypair::Ed25519Keypair;
use crate::ptb::{PreparedTransaction, TransactionInput};
use pond_sdk_types::{
    CallArg, GasData, ObjectArg, ObjectDigest, ObjectId, ObjectRef, Owner,
    ProgrammableTransaction, SuiAddress, TransactionBlockResponse, TransactionData,
    CLOCK_OBJECT, SUI_COIN_TYPE,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

const JSONRPC_VERSION: &str = "2.0";

/// A client bound to one fullnode endpoint.
#[derive(Clone, Debug)]
pub struct SuiClient {
    http: reqwest::Client,
    rpc_url: Url,
}

/// One coin owned by an address, as reported by `suix_getCoins`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    /// The coin's Move type, e.g. `0x2::sui::SUI`.
    pub coin_type: String,
    /// The coin object's ID.
    pub coin_object_id: ObjectId,
    /// Object version, as a decimal string.
    pub version: String,
    /// Object digest.
    pub digest: ObjectDigest,
    /// Balance in the coin's smallest unit, as a decimal string.
    pub balance: String,
}

/// A page of coins.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinPage {
    /// The coins on this page.
    pub data: Vec<Coin>,
    /// Cursor to pass back for the next page.
    #[serde(default)]
    pub next_cursor: Option<String>,
    /// True when more pages follow.
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
struct ObjectResponse {
    data: Option<ObjectData>,
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectData {
    object_id: ObjectId,
    version: String,
    digest: ObjectDigest,
    owner: Option<Owner>,
}

impl SuiClient {
    /// Creates a client from endpoint settings.
    pub fn new(config: SuiConfig) -> SdkResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            rpc_url: config.rpc_url().clone(),
        })
    }

    /// Creates a client from the environment (`POND_RPC_URL`).
    pub fn from_env() -> SdkResult<Self> {
        Self::new(SuiConfig::from_env()?)
    }

    /// The endpoint this client talks to.
    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    async fn rpc<T: DeserializeOwned>(&self, method: &str, params: Value) -> SdkResult<T> {
        let body = json!({
            "jsonrpc": JSONRPC_VERSION,
            "id": 1,
            "method": method,
            "params": params,
        });
        let response = self.http.post(self.rpc_url.clone()).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SdkError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Value = response.json().await?;
        if let Some(error) = envelope.get("error") {
            return Err(SdkError::Rpc {
                code: error.get("code").and_then(Value::as_i64).unwrap_or(0),
                message: error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown rpc error")
                    .to_string(),
            });
        }
        let result = envelope
            .get("result")
            .cloned()
            .ok_or_else(|| SdkError::Rpc {
                code: 0,
                message: format!("{method}: response had neither result nor error"),
            })?;
        Ok(serde_json::from_value(result)?)
    }

    /// Fetches the current reference gas price in MIST.
    pub async fn get_reference_gas_price(&self) -> SdkResult<u64> {
        let price: String = self.rpc("suix_getReferenceGasPrice", json!([])).await?;
        price
            .parse()
            .map_err(|_| SdkError::GasPayment(format!("bad reference gas price: {price}")))
    }

    /// Fetches one page of the SUI coins owned by `owner`, starting
    /// at `cursor` (`None` for the first page).
    pub async fn get_coins(
        &self,
        owner: SuiAddress,
        cursor: Option<&str>,
    ) -> SdkResult<CoinPage> {
        self.rpc(
            "suix_getCoins",
            json!([owner.to_hex(), SUI_COIN_TYPE, cursor, null]),
        )
        .await
    }

    async fn get_object(&self, id: ObjectId) -> SdkResult<ObjectData> {
        let response: ObjectResponse = self
            .rpc(
                "sui_getObject",
                json!([id.to_hex(), {"showOwner": true}]),
            )
            .await?;
        if let Some(error) = response.error {
            return Err(SdkError::ObjectNotFound(format!(
                "{}: {error}",
                id.to_short_string()
            )));
        }
        response
            .data
            .ok_or_else(|| SdkError::ObjectNotFound(id.to_short_string()))
    }

    /// Resolves a prepared transaction into signable transaction data:
    /// looks up every object input, selects a gas coin owned by
    /// `sender` that is not itself an input, and fills in the gas
    /// price.
    pub async fn resolve(
        &self,
        prepared: &PreparedTransaction,
        sender: SuiAddress,
    ) -> SdkResult<TransactionData> {
        let gas_price = match prepared.gas_price() {
            Some(price) => price,
            None => self.get_reference_gas_price().await?,
        };

        let mut inputs = Vec::with_capacity(prepared.inputs().len());
        for input in prepared.inputs() {
            match input {
                TransactionInput::Pure(bytes) => inputs.push(CallArg::Pure(bytes.clone())),
                TransactionInput::Object(id) => {
                    inputs.push(CallArg::Object(self.resolve_object(*id).await?))
                }
            }
        }

        let input_ids = prepared.object_ids();
        let payment = self
            .select_gas_coin(sender, prepared.gas_budget(), &input_ids)
            .await?;

        let pt = ProgrammableTransaction {
            inputs,
            commands: prepared.commands().to_vec(),
        };
        let gas_data = GasData {
            payment: vec![payment],
            owner: sender,
            price: gas_price,
            budget: prepared.gas_budget(),
        };
        Ok(TransactionData::new_programmable(sender, pt, gas_data))
    }

    async fn resolve_object(&self, id: ObjectId) -> SdkResult<ObjectArg> {
        let data = self.get_object(id).await?;
        match data.owner {
            Some(Owner::Shared {
                initial_shared_version,
            }) => Ok(ObjectArg::SharedObject {
                id,
                initial_shared_version,
                // The Clock can only ever be read.
                mutable: id != CLOCK_OBJECT,
            }),
            _ => Ok(ObjectArg::ImmOrOwnedObject(ObjectRef::new(
                data.object_id,
                parse_version(&data.version, id)?,
                data.digest,
            ))),
        }
    }

    async fn select_gas_coin(
        &self,
        sender: SuiAddress,
        budget: u64,
        excluded: &[ObjectId],
    ) -> SdkResult<ObjectRef> {
        let mut cursor: Option<String> = None;
        loop {
            let page = self.get_coins(sender, cursor.as_deref()).await?;
            for coin in &page.data {
                if excluded.contains(&coin.coin_object_id) {
                    continue;
                }
                let balance: u64 = coin.balance.parse().map_err(|_| {
                    SdkError::GasPayment(format!("bad coin balance: {}", coin.balance))
                })?;
                if balance >= budget {
                    return Ok(ObjectRef::new(
                        coin.coin_object_id,
                        parse_version(&coin.version, coin.coin_object_id)?,
                        coin.digest,
                    ));
                }
            }
            match (page.has_next_page, page.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                _ => break,
            }
        }
        Err(SdkError::GasPayment(format!(
            "no SUI coin with balance >= {budget} available for {}",
            sender.to_short_string()
        )))
    }

    /// Resolves, signs and submits a prepared transaction, waiting for
    /// local execution. Effects and object changes are requested.
    pub async fn sign_and_execute(
        &self,
        keypair: &Ed25519Keypair,
        prepared: &PreparedTransaction,
    ) -> SdkResult<TransactionBlockResponse> {
        let data = self.resolve(prepared, keypair.address()).await?;
        let tx_bytes = bcs::to_bytes(&data)?;
        let signature = keypair.sign_tx_bytes(&tx_bytes);
        self.execute_transaction_block(&base64::encode(&tx_bytes), vec![signature])
            .await
    }

    /// Submits already-signed transaction bytes.
    pub async fn execute_transaction_block(
        &self,
        tx_bytes_b64: &str,
        signatures: Vec<String>,
    ) -> SdkResult<TransactionBlockResponse> {
        self.rpc(
            "sui_executeTransactionBlock",
            json!([
                tx_bytes_b64,
                signatures,
                {"showEffects": true, "showObjectChanges": true},
                "WaitForLocalExecution",
            ]),
        )
        .await
    }
}

fn parse_version(version: &str, id: ObjectId) -> SdkResult<u64> {
    version.parse().map_err(|_| {
        SdkError::InvalidObject(id.to_short_string(), format!("bad version: {version}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ptb::TransactionBuilder;
    use pond_sdk_types::TransactionKind;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DIGEST: &str = "11111111111111111111111111111111";

    async fn client_for(server: &MockServer) -> SuiClient {
        SuiClient::new(SuiConfig::custom(&server.uri()).unwrap()).unwrap()
    }

    fn rpc_result(result: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": result,
        }))
    }

    async fn mount_gas_price(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(json!({"method": "suix_getReferenceGasPrice"})))
            .respond_with(rpc_result(json!("1000")))
            .mount(server)
            .await;
    }

    async fn mount_coins(server: &MockServer, coins: Value) {
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(json!({"method": "suix_getCoins"})))
            .respond_with(rpc_result(json!({
                "data": coins,
                "hasNextPage": false,
            })))
            .mount(server)
            .await;
    }

    fn coin_json(id: &str, balance: &str) -> Value {
        json!({
            "coinType": "0x2::sui::SUI",
            "coinObjectId": id,
            "version": "10",
            "digest": DIGEST,
            "balance": balance,
        })
    }

    async fn mount_object(server: &MockServer, id: &str, owner: Value) {
        let full = ObjectId::from_hex(id).unwrap().to_hex();
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(json!({
                "method": "sui_getObject",
                "params": [full],
            })))
            .respond_with(rpc_result(json!({
                "data": {
                    "objectId": full,
                    "version": "33",
                    "digest": DIGEST,
                    "owner": owner,
                }
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_get_reference_gas_price() {
        let server = MockServer::start().await;
        mount_gas_price(&server).await;
        let client = client_for(&server).await;
        assert_eq!(client.get_reference_gas_price().await.unwrap(), 1000);
    }

    #[tokio::test]
    async fn test_rpc_error_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": -32602, "message": "Invalid params"},
            })))
            .mount(&server)
            .await;
        let client = client_for(&server).await;
        let err = client.get_reference_gas_price().await.unwrap_err();
        match err {
            SdkError::Rpc { code, message } => {
                assert_eq!(code, -32602);
                assert_eq!(message, "Invalid params");
            }
            other => panic!("expected rpc error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_error_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;
        let client = client_for(&server).await;
        let err = client.get_reference_gas_price().await.unwrap_err();
        assert!(matches!(err, SdkError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_resolve_shared_objects_and_clock() {
        let server = MockServer::start().await;
        mount_gas_price(&server).await;
        mount_coins(&server, json!([coin_json("0xaaa", "5000000000")])).await;
        mount_object(&server, "0x6", json!({"Shared": {"initial_shared_version": 1}})).await;
        mount_object(&server, "0xf6", json!({"Shared": {"initial_shared_version": 99}})).await;

        let mut tx = TransactionBuilder::new();
        let oracle = tx.object(ObjectId::from_hex("0xf6").unwrap()).unwrap();
        let clock = tx.object(ObjectId::from_hex("0x6").unwrap()).unwrap();
        tx.move_call("0x2::oracle::update", vec![], vec![oracle, clock])
            .unwrap();
        tx.set_gas_budget(10_000_000);
        let prepared = tx.finish().unwrap();

        let client = client_for(&server).await;
        let sender = SuiAddress::from_hex("0x1").unwrap();
        let data = client.resolve(&prepared, sender).await.unwrap();

        let TransactionData::V1(v1) = &data;
        let TransactionKind::ProgrammableTransaction(pt) = &v1.kind;
        match &pt.inputs[0] {
            CallArg::Object(ObjectArg::SharedObject {
                initial_shared_version,
                mutable,
                ..
            }) => {
                assert_eq!(*initial_shared_version, 99);
                assert!(*mutable);
            }
            other => panic!("expected shared object, got {other:?}"),
        }
        match &pt.inputs[1] {
            CallArg::Object(ObjectArg::SharedObject { mutable, .. }) => {
                assert!(!*mutable, "clock must be read-only");
            }
            other => panic!("expected shared clock, got {other:?}"),
        }
        assert_eq!(v1.gas_data.price, 1000);
        assert_eq!(v1.gas_data.budget, 10_000_000);
        assert_eq!(
            v1.gas_data.payment[0].id,
            ObjectId::from_hex("0xaaa").unwrap()
        );
    }

    #[tokio::test]
    async fn test_gas_coin_skips_input_objects_and_small_coins() {
        let server = MockServer::start().await;
        mount_gas_price(&server).await;
        mount_coins(
            &server,
            json!([
                coin_json("0xbbb", "100"),
                coin_json("0xccc", "20000000000"),
                coin_json("0xddd", "20000000000"),
            ]),
        )
        .await;
        mount_object(&server, "0xccc", json!({"AddressOwner": "0x1"})).await;

        let mut tx = TransactionBuilder::new();
        let coin = tx.object(ObjectId::from_hex("0xccc").unwrap()).unwrap();
        let dest = tx.pure(&SuiAddress::from_hex("0x2").unwrap()).unwrap();
        tx.transfer_objects(vec![coin], dest).unwrap();
        tx.set_gas_budget(10_000_000);
        let prepared = tx.finish().unwrap();

        let client = client_for(&server).await;
        let data = client
            .resolve(&prepared, SuiAddress::from_hex("0x1").unwrap())
            .await
            .unwrap();
        let TransactionData::V1(v1) = &data;
        // 0xbbb is too small and 0xccc is an input, so 0xddd pays gas.
        assert_eq!(
            v1.gas_data.payment[0].id,
            ObjectId::from_hex("0xddd").unwrap()
        );
    }

    #[tokio::test]
    async fn test_no_gas_coin_available() {
        let server = MockServer::start().await;
        mount_gas_price(&server).await;
        mount_coins(&server, json!([coin_json("0xbbb", "100")])).await;

        let mut tx = TransactionBuilder::new();
        let amount = tx.pure(&1u64).unwrap();
        tx.split_coins(tx.gas_coin(), vec![amount]).unwrap();
        tx.set_gas_budget(10_000_000);
        let prepared = tx.finish().unwrap();

        let client = client_for(&server).await;
        let err = client
            .resolve(&prepared, SuiAddress::from_hex("0x1").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::GasPayment(_)));
    }

    #[tokio::test]
    async fn test_gas_selection_follows_coin_pages() {
        let server = MockServer::start().await;
        mount_gas_price(&server).await;
        let owner = SuiAddress::from_hex("0x1").unwrap();
        // First page holds only dust; the sufficient coin is behind
        // the cursor.
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(json!({
                "method": "suix_getCoins",
                "params": [owner.to_hex(), "0x2::sui::SUI", null],
            })))
            .respond_with(rpc_result(json!({
                "data": [coin_json("0xbbb", "100")],
                "nextCursor": "0xbbb",
                "hasNextPage": true,
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(json!({
                "method": "suix_getCoins",
                "params": [owner.to_hex(), "0x2::sui::SUI", "0xbbb"],
            })))
            .respond_with(rpc_result(json!({
                "data": [coin_json("0xccc", "20000000000")],
                "hasNextPage": false,
            })))
            .mount(&server)
            .await;

        let mut tx = TransactionBuilder::new();
        let amount = tx.pure(&1u64).unwrap();
        tx.split_coins(tx.gas_coin(), vec![amount]).unwrap();
        tx.set_gas_budget(10_000_000);
        let prepared = tx.finish().unwrap();

        let client = client_for(&server).await;
        let data = client.resolve(&prepared, owner).await.unwrap();
        let TransactionData::V1(v1) = &data;
        assert_eq!(
            v1.gas_data.payment[0].id,
            ObjectId::from_hex("0xccc").unwrap()
        );
    }

    #[tokio::test]
    async fn test_sign_and_execute_success() {
        let server = MockServer::start().await;
        mount_gas_price(&server).await;
        mount_coins(&server, json!([coin_json("0xaaa", "20000000000")])).await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "method": "sui_executeTransactionBlock",
            })))
            .respond_with(rpc_result(json!({
                "digest": DIGEST,
                "effects": {"status": {"status": "success"}},
                "objectChanges": [],
                "confirmedLocalExecution": true,
            })))
            .mount(&server)
            .await;

        let keypair = Ed25519Keypair::from_seed_bytes(&[4u8; 32]).unwrap();
        let mut tx = TransactionBuilder::new();
        let amount = tx.pure(&1000u64).unwrap();
        let coins = tx.split_coins(tx.gas_coin(), vec![amount]).unwrap();
        let dest = tx.pure(&SuiAddress::from_hex("0x2").unwrap()).unwrap();
        tx.transfer_objects(coins, dest).unwrap();
        tx.set_gas_budget(10_000_000);
        let prepared = tx.finish().unwrap();

        let client = client_for(&server).await;
        let response = client.sign_and_execute(&keypair, &prepared).await.unwrap();
        assert!(response.is_success());
        assert_eq!(response.confirmed_local_execution, Some(true));
    }

    #[tokio::test]
    async fn test_transfer_shows_up_in_object_changes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"method": "sui_executeTransactionBlock"})))
            .respond_with(rpc_result(json!({
                "digest": DIGEST,
                "effects": {"status": {"status": "success"}},
                "objectChanges": [{
                    "type": "transferred",
                    "sender": "0x1",
                    "recipient": {"AddressOwner": "0xa0"},
                    "objectType": "0x2::coin::Coin<0x2::sui::SUI>",
                    "objectId": "0xabc",
                    "version": "12",
                    "digest": DIGEST,
                }],
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let response = client
            .execute_transaction_block("AAAA", vec!["sig".to_string()])
            .await
            .unwrap();
        let changes = response.object_changes.unwrap();
        assert_eq!(changes.len(), 1);
        match &changes[0] {
            pond_sdk_types::ObjectChange::Transferred { recipient, .. } => {
                assert_eq!(
                    recipient,
                    &Owner::AddressOwner(SuiAddress::from_hex("0xa0").unwrap())
                );
            }
            other => panic!("expected transferred change, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resubmission_is_not_idempotent() {
        let server = MockServer::start().await;
        // First submission lands; after the gas coin's version has
        // moved on, the same signed bytes are rejected.
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"method": "sui_executeTransactionBlock"})))
            .respond_with(rpc_result(json!({
                "digest": DIGEST,
                "effects": {"status": {"status": "success"}},
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"method": "sui_executeTransactionBlock"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {
                    "code": -32002,
                    "message": "Object version unavailable for consumption",
                },
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let first = client
            .execute_transaction_block("AAAA", vec!["sig".to_string()])
            .await
            .unwrap();
        assert!(first.is_success());
        let second = client
            .execute_transaction_block("AAAA", vec!["sig".to_string()])
            .await;
        assert!(matches!(second, Err(SdkError::Rpc { code: -32002, .. })));
    }

    #[tokio::test]
    async fn test_on_chain_failure_is_ok_but_not_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"method": "sui_executeTransactionBlock"})))
            .respond_with(rpc_result(json!({
                "digest": DIGEST,
                "effects": {
                    "status": {"status": "failure", "error": "InsufficientCoinBalance"},
                },
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let response = client
            .execute_transaction_block("AAAA", vec!["sig".to_string()])
            .await
            .unwrap();
        assert!(!response.is_success());
        assert_eq!(
            response.status().unwrap().error.as_deref(),
            Some("InsufficientCoinBalance")
        );
    }
}
