use crate::{ApiRequest, RequestScope, Transport};
use roborally_core::{
    decode_player, decode_player_pair, decode_players, parse_data, CardMove, HandKind, Player,
    RequestFailure,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransferBody<'a> {
    from_hand: HandKind,
    from_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    to_id: Option<&'a str>,
    to_hand: HandKind,
    to_index: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DiscardBody {
    from_hand: HandKind,
    from_index: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum PowerCardBody {
    Orb(u8),
    NumUses(u8),
}

#[derive(Debug, Serialize)]
struct ThrowBody {
    index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    Single(Player),
    Pair(Player, Player),
}

pub struct ApiClient<T> {
    transport: T,
    scope: RequestScope,
}

impl<T> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_scope(transport, RequestScope::new())
    }

    pub fn with_scope(transport: T, scope: RequestScope) -> Self {
        Self { transport, scope }
    }

    pub fn scope(&self) -> &RequestScope {
        &self.scope
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn get_player(&self, id: &str) -> Player {
        let result = self
            .request(ApiRequest::get(format!("/players/{id}")))
            .and_then(decode_player);
        log_failure("get player", id, result).unwrap_or_default()
    }

    pub fn get_players(&self) -> Vec<Player> {
        let result = self
            .request(ApiRequest::get("/players"))
            .and_then(decode_players);
        log_failure("get players", "*", result).unwrap_or_default()
    }

    pub fn draw_power_card(&self, id: &str) -> Result<Player, RequestFailure> {
        let result = self
            .request(ApiRequest::get(format!("/players/{id}/drawPowerCard")))
            .and_then(decode_player);
        log_failure("draw power card", id, result)
    }

    pub fn transfer_card(
        &self,
        id: &str,
        from_hand: HandKind,
        from_index: usize,
        to_hand: HandKind,
        to_index: usize,
    ) -> Result<Player, RequestFailure> {
        let body = TransferBody {
            from_hand,
            from_index,
            to_id: None,
            to_hand,
            to_index,
        };
        let result = serde_json::to_value(&body)
            .map_err(RequestFailure::from)
            .and_then(|body| {
                self.request(ApiRequest::post(format!("/players/{id}/transferCard"), body))
            })
            .and_then(decode_player);
        log_failure("transfer card", id, result)
    }

    /// The server answers with both players, source first.
    pub fn transfer_between_players(
        &self,
        from_id: &str,
        from_index: usize,
        to_id: &str,
        to_index: usize,
    ) -> Result<(Player, Player), RequestFailure> {
        let body = TransferBody {
            from_hand: HandKind::PowerHand,
            from_index,
            to_id: Some(to_id),
            to_hand: HandKind::PowerHand,
            to_index,
        };
        let result = serde_json::to_value(&body)
            .map_err(RequestFailure::from)
            .and_then(|body| {
                self.request(ApiRequest::post(
                    format!("/players/{from_id}/transferCard"),
                    body,
                ))
            })
            .and_then(decode_player_pair);
        log_failure("transfer card between players", from_id, result)
    }

    pub fn discard_card(
        &self,
        id: &str,
        from_hand: HandKind,
        from_index: usize,
    ) -> Result<Player, RequestFailure> {
        let body = DiscardBody {
            from_hand,
            from_index,
        };
        let result = serde_json::to_value(&body)
            .map_err(RequestFailure::from)
            .and_then(|body| {
                self.request(ApiRequest::post(format!("/players/{id}/discardCard"), body))
            })
            .and_then(decode_player);
        log_failure("discard card", id, result)
    }

    pub fn set_orb(&self, id: &str, filename: &str, orb: u8) -> Result<Player, RequestFailure> {
        let result = self.update_power_card(id, filename, PowerCardBody::Orb(orb));
        log_failure("set orb", id, result)
    }

    pub fn set_num_uses(
        &self,
        id: &str,
        filename: &str,
        num_uses: u8,
    ) -> Result<Player, RequestFailure> {
        let result = self.update_power_card(id, filename, PowerCardBody::NumUses(num_uses));
        log_failure("set num uses", id, result)
    }

    pub fn throw_register(&self, id: &str, index: usize) -> Result<Player, RequestFailure> {
        let result = serde_json::to_value(ThrowBody { index })
            .map_err(RequestFailure::from)
            .and_then(|body| self.request(ApiRequest::post(format!("/players/{id}/throw"), body)))
            .and_then(decode_player);
        log_failure("throw register", id, result)
    }

    pub fn move_card(&self, card_move: &CardMove) -> Result<MoveOutcome, RequestFailure> {
        let CardMove { from, to } = card_move;
        if card_move.is_cross_player() {
            self.transfer_between_players(&from.player, from.index, &to.player, to.index)
                .map(|(from, to)| MoveOutcome::Pair(from, to))
        } else {
            self.transfer_card(&from.player, from.hand, from.index, to.hand, to.index)
                .map(MoveOutcome::Single)
        }
    }

    fn update_power_card(
        &self,
        id: &str,
        filename: &str,
        body: PowerCardBody,
    ) -> Result<Player, RequestFailure> {
        let body = serde_json::to_value(&body)?;
        let value = self.request(ApiRequest::put(
            format!("/players/{id}/powerCard/{filename}"),
            body,
        ))?;
        decode_player(value)
    }

    fn request(&self, request: ApiRequest) -> Result<Value, RequestFailure> {
        if self.scope.is_cancelled() {
            return Err(RequestFailure::Cancelled);
        }
        let envelope = self.transport.send(&request)?;
        if self.scope.is_cancelled() {
            return Err(RequestFailure::Cancelled);
        }
        parse_data(envelope)
    }
}

fn log_failure<R>(
    operation: &str,
    player: &str,
    result: Result<R, RequestFailure>,
) -> Result<R, RequestFailure> {
    match &result {
        Err(RequestFailure::Cancelled) => {
            tracing::debug!(operation, player, "request dropped after teardown");
        }
        Err(err) => tracing::error!(operation, player, error = %err, "request failed"),
        Ok(_) => tracing::debug!(operation, player, "request ok"),
    }
    result
}
