use crate::Player;

/// The shared coin pool. Every coin not in a player's stack sits here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Treasury {
    balance: u8,
}

impl Treasury {
    pub fn new(balance: u8) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u8 {
        self.balance
    }

    /// Pays `amount` to `player`, or whatever is left if the pool runs short. Returns what was paid.
    pub fn grant(&mut self, player: &mut Player, amount: u8) -> u8 {
        let paid = amount.min(self.balance);
        self.balance -= paid;
        player.coins += paid;
        paid
    }

    /// Takes up to `amount` from `player`. Returns what was collected.
    pub fn collect(&mut self, player: &mut Player, amount: u8) -> u8 {
        let taken = amount.min(player.coins);
        player.coins -= taken;
        self.balance += taken;
        taken
    }
}

/// Moves up to `amount` straight from one player to another. Returns what moved.
pub fn transfer(from: &mut Player, to: &mut Player, amount: u8) -> u8 {
    let moved = amount.min(from.coins);
    from.coins -= moved;
    to.coins += moved;
    moved
}

#[cfg(test)]
mod tests {
    use crate::ai::Scripted;
    use crate::treasury::{transfer, Treasury};
    use crate::Player;

    fn player(coins: u8) -> Player {
        let mut player = Player::ai("Ana", Scripted::default());
        player.reset(coins);
        player
    }

    #[test]
    fn grant_is_capped_by_balance() {
        let mut treasury = Treasury::new(2);
        let mut ana = player(0);

        assert_eq!(treasury.grant(&mut ana, 3), 2);
        assert_eq!(ana.coins(), 2);
        assert_eq!(treasury.balance(), 0);
    }

    #[test]
    fn collect_is_capped_by_stack() {
        let mut treasury = Treasury::new(10);
        let mut ana = player(1);

        assert_eq!(treasury.collect(&mut ana, 3), 1);
        assert_eq!(ana.coins(), 0);
        assert_eq!(treasury.balance(), 11);
    }

    #[test]
    fn steal_takes_what_there_is() {
        let mut ana = player(2);
        let mut bo = player(1);

        assert_eq!(transfer(&mut bo, &mut ana, 2), 1);
        assert_eq!(ana.coins(), 3);
        assert_eq!(bo.coins(), 0);
    }
}
